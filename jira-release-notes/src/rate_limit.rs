//! Rate limit handling for Jira requests.
//!
//! Jira Cloud answers `429 Too Many Requests` with a `Retry-After` header
//! giving the number of seconds to back off.

use reqwest::header::{HeaderMap, RETRY_AFTER};
use std::time::Duration;
use tracing::{info, warn};

/// Maximum time to wait before retrying a rate-limited request.
const MAX_WAIT_SECS: u64 = 60;

/// Reads the `Retry-After` header as a number of seconds.
///
/// HTTP-date values are not supported and yield `None`.
#[must_use]
pub fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Waits for the duration requested by a `Retry-After` header, capped at
/// `MAX_WAIT_SECS`.
pub async fn wait_for_retry_after(retry_after_secs: u64) {
    if retry_after_secs > MAX_WAIT_SECS {
        warn!(
            retry_after = retry_after_secs,
            max_wait = MAX_WAIT_SECS,
            "Retry-After too far in future, capping wait time"
        );
    }

    let actual_wait = retry_after_secs.min(MAX_WAIT_SECS);
    info!(
        retry_after = retry_after_secs,
        actual_wait, "Rate limited by Jira, waiting"
    );
    tokio::time::sleep(Duration::from_secs(actual_wait)).await;
}
