//! The polling loop: fetch a task until it reaches a target state.

use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;
use tokio::time::{Instant, sleep};

use super::WaitOptions;
use crate::domain::{ApiError, Task, TaskId, TaskState};
use crate::ports::TaskFetcher;

/// Why a wait ended without reaching the target state.
#[derive(Debug, Error)]
pub enum WaitError {
    /// Reading the task failed; the wait is aborted, not retried.
    #[error("failed to fetch task {task_id}")]
    Fetch {
        task_id: TaskId,
        #[source]
        source: ApiError,
    },

    /// The task reached the `ERROR` state.
    #[error("task {task_id} is in error state: {message}")]
    TaskFailed { task_id: TaskId, message: String },

    /// A non-terminal task carried error text and the caller asked to stop on it.
    #[error("task {task_id} reported an error while {state}: {message}")]
    TaskReportedError {
        task_id: TaskId,
        state: TaskState,
        message: String,
    },

    #[error("timed out after {}s waiting for task {task_id} to become {target}", timeout.as_secs())]
    Timeout {
        task_id: TaskId,
        target: TaskState,
        timeout: Duration,
    },
}

impl WaitError {
    pub fn task_id(&self) -> &TaskId {
        match self {
            WaitError::Fetch { task_id, .. }
            | WaitError::TaskFailed { task_id, .. }
            | WaitError::TaskReportedError { task_id, .. }
            | WaitError::Timeout { task_id, .. } => task_id,
        }
    }

    /// Timeouts mean "still in progress as far as we know", not a definite
    /// failure. Callers may want to report them differently.
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }
}

const UNKNOWN_TASK_ERROR: &str = "unknown error";

/// Poll `task_id` until it reaches `target`.
///
/// Returns the snapshot that matched. Per iteration, in this order:
/// 1. budget used up -> `Timeout` (no fetch after the deadline)
/// 2. fetch failed -> `Fetch`
/// 3. state == target -> done
/// 4. state == ERROR -> `TaskFailed`, regardless of `stop_on_task_error`
/// 5. error text present and `stop_on_task_error` -> `TaskReportedError`
/// 6. sleep `poll_interval`
///
/// The first fetch is immediate. Fetches are strictly sequential; there is
/// never more than one request in flight per call.
pub async fn wait_for_status<F>(
    fetcher: &F,
    task_id: &TaskId,
    target: TaskState,
    options: &WaitOptions,
) -> Result<Task, WaitError>
where
    F: TaskFetcher + ?Sized,
{
    let started = Instant::now();
    let mut polls: u32 = 0;

    loop {
        if options.is_expired(started.elapsed()) {
            warn!(
                "task {task_id}: not {target} after {polls} polls, giving up ({}s budget)",
                options.timeout.as_secs()
            );
            return Err(WaitError::Timeout {
                task_id: task_id.clone(),
                target,
                timeout: options.timeout,
            });
        }

        let task = fetcher
            .get_task(task_id)
            .await
            .map_err(|source| WaitError::Fetch {
                task_id: task_id.clone(),
                source,
            })?;
        polls += 1;
        debug!("task {task_id}: poll #{polls} state={}", task.state);

        if task.state == target {
            info!(
                "task {task_id}: {target} after {polls} polls ({:.1}s)",
                started.elapsed().as_secs_f64()
            );
            return Ok(task);
        }

        if task.state == TaskState::Error {
            let message = task
                .error
                .unwrap_or_else(|| UNKNOWN_TASK_ERROR.to_string());
            warn!("task {task_id}: failed: {message}");
            return Err(WaitError::TaskFailed {
                task_id: task_id.clone(),
                message,
            });
        }

        if options.stop_on_task_error
            && let Some(message) = task.error
        {
            warn!("task {task_id}: reported error while {}: {message}", task.state);
            return Err(WaitError::TaskReportedError {
                task_id: task_id.clone(),
                state: task.state,
                message,
            });
        }

        sleep(options.poll_interval).await;
    }
}
