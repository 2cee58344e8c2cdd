//! Network text fetch capability
//!
//! The controller only needs "give me the text at this URL within this
//! timeout". Whatever sits behind it (HTTP client, subprocess, test double)
//! must report every failure through `RawResponse::succeeded` and never
//! panic or hang past the timeout.

use std::future::Future;
use std::time::Duration;

use crate::state::RawResponse;

/// Per-request timeout. Fixed, not configurable.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Extra time the controller waits past [`FETCH_TIMEOUT`] before it gives up
/// on a fetcher that ignored its own timeout.
pub const WATCHDOG_GRACE: Duration = Duration::from_secs(1);

pub trait TextFetcher: Send + Sync + 'static {
    /// Fetch the body at `url`. Timeouts, DNS and connection errors and
    /// non-success statuses all come back as `succeeded: false`.
    fn fetch_text(&self, url: &str, timeout: Duration)
        -> impl Future<Output = RawResponse> + Send;
}
