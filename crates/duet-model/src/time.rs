//! Wall-clock helper.

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time as epoch milliseconds.
///
/// Timestamps are part of the produced read models (`created_at`,
/// `last_seen`), so they use the wall clock rather than `Instant`.
/// A clock set before 1970 yields 0 rather than panicking.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
