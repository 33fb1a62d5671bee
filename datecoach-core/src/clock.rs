use chrono::Utc;

/// Wall-clock milliseconds since the Unix epoch.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Whole seconds (rounded up) until `deadline_ms`, never below 1.
pub fn remaining_secs(deadline_ms: i64, now_ms: i64) -> u64 {
    let remaining = deadline_ms.saturating_sub(now_ms).max(0) as u64;
    remaining.div_ceil(1000).max(1)
}
