//! Default values for configuration options.

use std::time::Duration;

/// Default interval between reconcile passes, in seconds.
pub const INTERVAL_SECS: u64 = 300;

/// Default IP-echo service queried for the public address.
pub const IP_URL: &str = "https://ifconfig.me/ip";

/// DDNS provider update endpoint.
pub const UPDATE_URL: &str = "https://domains.google.com/nic/update";

/// User-Agent sent with every request. The provider rejects requests
/// without one (`badagent`).
pub const USER_AGENT: &str = concat!("ddns-sync/", env!("CARGO_PKG_VERSION"));

/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 5;

/// Default interval as Duration.
#[must_use]
pub const fn interval() -> Duration {
    Duration::from_secs(INTERVAL_SECS)
}

/// Per-request timeout as Duration.
#[must_use]
pub const fn request_timeout() -> Duration {
    Duration::from_secs(REQUEST_TIMEOUT_SECS)
}
