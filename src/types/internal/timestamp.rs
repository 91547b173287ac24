//! Row timestamps: `i64` microseconds since the Unix epoch.

use chrono::Utc;

pub fn now_micros() -> i64 {
    Utc::now().timestamp_micros()
}

/// Next `updated_at` for a row last touched at `previous`
///
/// Strictly greater than `previous` even when the wall clock has not moved
/// (or moved backwards) since the last write.
pub fn advance(previous: i64) -> i64 {
    now_micros().max(previous.saturating_add(1))
}
