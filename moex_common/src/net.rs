//! Shared endpoint defaults and refresh constants used by server and client.
use std::time::Duration;

/// Address the endpoint server binds to by default.
pub const DEFAULT_BIND: &str = "0.0.0.0:8088";
/// Endpoint base the dashboard polls by default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8088/";
/// Public MOEX ISS root.
pub const ISS_BASE_URL: &str = "https://iss.moex.com/iss";
/// Seconds between two quote polls.
pub const POLL_INTERVAL_SECS: u64 = 60;
/// Seconds before an HTTP request is abandoned.
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Helper to turn a seconds setting into a `Duration`, clamping zero to one second.
pub fn secs(value: u64) -> Duration {
    Duration::from_secs(value.max(1))
}
