//! UTC clock and the textual timestamp convention used for storage

use chrono::{DateTime, Utc};

/// Source of the current instant, swappable for deterministic timestamps.
pub type Clock = fn() -> DateTime<Utc>;

/// Current wall-clock instant in UTC.
pub fn utc_now() -> DateTime<Utc> {
    Utc::now()
}

/// Render an instant as ISO-8601 with an explicit `+00:00` designator.
///
/// Precision is microseconds and the fraction is omitted when zero, so
/// `2020-01-01T00:00:00+00:00` and `2020-01-01T00:00:00.250000+00:00`.
pub fn format_utc(ts: &DateTime<Utc>) -> String {
    if ts.timestamp_subsec_micros() == 0 {
        ts.format("%Y-%m-%dT%H:%M:%S+00:00").to_string()
    } else {
        ts.format("%Y-%m-%dT%H:%M:%S%.6f+00:00").to_string()
    }
}
