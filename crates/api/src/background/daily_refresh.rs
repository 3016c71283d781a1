//! Midnight refresh of the daily boards.
//!
//! Sleeps until the next local midnight, then asks the acquisition workflow
//! to make sure Easy, Medium and Hard each have a daily board for the new
//! day. Optionally runs once at startup to catch up on a missed midnight.

use std::sync::Arc;

use chrono::Local;
use tokio_util::sync::CancellationToken;
use waffle_core::calendar::{self, DayWindow};

use crate::services::acquisition::{Acquisition, RefreshReport};

/// Run the daily refresh loop until `cancel` is triggered.
pub async fn run(acquisition: Arc<Acquisition>, run_on_startup: bool, cancel: CancellationToken) {
    tracing::info!(run_on_startup, "Daily refresh job started");

    if run_on_startup && refresh_or_cancel(&acquisition, &cancel).await.is_none() {
        tracing::info!("Daily refresh job stopping");
        return;
    }

    loop {
        let wait = calendar::until_next_midnight(&Local::now());
        tracing::debug!(wait_secs = wait.as_secs(), "Next daily refresh scheduled");

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Daily refresh job stopping");
                break;
            }
            _ = tokio::time::sleep(wait) => {
                if refresh_or_cancel(&acquisition, &cancel).await.is_none() {
                    tracing::info!("Daily refresh job stopping");
                    break;
                }
            }
        }
    }
}

/// Refresh today's boards, abandoning the run if shutdown starts first.
async fn refresh_or_cancel(
    acquisition: &Acquisition,
    cancel: &CancellationToken,
) -> Option<RefreshReport> {
    let window = DayWindow::today();
    tokio::select! {
        _ = cancel.cancelled() => None,
        report = acquisition.refresh_daily(window) => Some(report),
    }
}
