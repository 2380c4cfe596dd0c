//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Timestamps for saved scores

use chrono::{SecondsFormat, Utc};

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    Utc::now().timestamp_millis() as f64
}

/// Current time as an ISO-8601 string, e.g. `2026-10-19T08:30:00.000Z`
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
