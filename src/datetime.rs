//! Date/time helpers for stored timestamps.
//!
//! Timestamps are stored as UTC text. Message timestamps use a fixed-width
//! microsecond format so that text ordering matches chronological ordering.

use chrono::{DateTime, Utc};

/// Storage format for timestamps written by the application.
pub const DB_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Storage format used by SQLite's `datetime('now')`.
pub const DB_SECONDS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a UTC datetime for storage.
pub fn to_db_timestamp(dt: &DateTime<Utc>) -> String {
    dt.format(DB_TIMESTAMP_FORMAT).to_string()
}

/// Current UTC time in storage format.
pub fn now_db_timestamp() -> String {
    to_db_timestamp(&Utc::now())
}

/// Convert a stored timestamp (`YYYY-MM-DD HH:MM:SS[.ffffff]`) to RFC3339.
///
/// The database stores UTC, so a `Z` suffix is appended.
pub fn to_rfc3339(datetime_str: &str) -> String {
    format!("{}Z", datetime_str.replace(' ', "T"))
}
