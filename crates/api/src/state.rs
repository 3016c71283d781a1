use std::sync::Arc;

use waffle_db::SharedStore;

use crate::config::ServerConfig;
use crate::services::acquisition::Acquisition;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Board store (PostgreSQL or in-memory).
    pub store: SharedStore,
    /// Fetch-and-store workflow, shared with the daily refresh task.
    pub acquisition: Arc<Acquisition>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
