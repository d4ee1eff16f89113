//! Wait options: timeout budget and polling interval.

use std::time::Duration;

/// How long and how often to poll a task.
///
/// Fixed-interval polling, not exponential backoff: tasks are expected to
/// finish in seconds to minutes and the timeout is chosen per call site
/// (600–1200 s is common for cluster creation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOptions {
    /// Total wall-clock budget. Checked once per poll, so a slow fetch can
    /// overrun it by up to one request's latency. Zero fails before the first
    /// fetch.
    pub timeout: Duration,

    /// Sleep between two fetches.
    pub poll_interval: Duration,

    /// Abort as soon as a non-terminal task carries error text, instead of
    /// waiting for the formal `ERROR` state.
    pub stop_on_task_error: bool,
}

impl WaitOptions {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

    /// Options as call sites express them: whole seconds plus the fail-fast flag.
    pub fn new(timeout_secs: u64, stop_on_task_error: bool) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            stop_on_task_error,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Has `elapsed` used up the budget?
    pub fn is_expired(&self, elapsed: Duration) -> bool {
        elapsed >= self.timeout
    }
}

impl Default for WaitOptions {
    /// One hour, one-second polls, keep polling through soft errors.
    fn default() -> Self {
        Self::new(3600, false)
    }
}
