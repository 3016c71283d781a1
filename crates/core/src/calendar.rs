//! Local calendar-day arithmetic.
//!
//! "Today" for board lookups means the server's local calendar day. Boards
//! are stored with UTC timestamps, so a day is turned into a half-open UTC
//! range `[start, end)` where `end` is the following local midnight.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::types::Timestamp;

/// Half-open UTC range covering one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl DayWindow {
    /// The local calendar day containing `instant`, in `instant`'s time zone.
    pub fn containing<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        let tz = instant.timezone();
        let date = instant.date_naive();
        let start = start_of_day(&tz, date);
        let end = date
            .succ_opt()
            .map(|next| start_of_day(&tz, next))
            .unwrap_or_else(|| start.clone() + Duration::days(1));

        Self {
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        }
    }

    /// The current day in the server's local time zone.
    pub fn today() -> Self {
        Self::containing(&Local::now())
    }

    pub fn contains(&self, at: Timestamp) -> bool {
        self.start <= at && at < self.end
    }
}

/// Time remaining from `now` until the next local midnight.
pub fn until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> std::time::Duration {
    let window = DayWindow::containing(now);
    (window.end - now.with_timezone(&Utc))
        .to_std()
        .unwrap_or(std::time::Duration::ZERO)
}

/// First instant of `date` in `tz`.
///
/// When a DST transition skips midnight, the first valid hour after it is
/// used instead.
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Tz> {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=2)
        .find_map(|hour| {
            tz.from_local_datetime(&(midnight + Duration::hours(hour)))
                .earliest()
        })
        .unwrap_or_else(|| tz.from_utc_datetime(&midnight))
}
