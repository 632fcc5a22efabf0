//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for usage records and ranking.
pub type Timestamp = DateTime<Utc>;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Fractional days elapsed from `earlier` to `later`; negative when `earlier` is in the future.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn days_between(earlier: Timestamp, later: Timestamp) -> f64 {
    (later - earlier).num_seconds() as f64 / SECONDS_PER_DAY
}
