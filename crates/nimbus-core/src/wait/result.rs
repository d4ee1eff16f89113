//! Wait for a task, then run caller logic against it.
//!
//! The processor is the caller's "now go fetch what the task produced" step
//! (e.g. read the new cluster by the id in `created_resources`). It runs
//! exactly once, and only after the task reached `FINISHED`.

use std::future::Future;

use thiserror::Error;

use super::{WaitError, WaitOptions, wait_for_status};
use crate::domain::{TaskId, TaskState};
use crate::ports::TaskFetcher;

/// Failure of a wait-then-process call.
///
/// `Wait` means the task never finished (or we stopped looking);
/// `Process` means it finished but the follow-up step failed.
#[derive(Debug, Error)]
pub enum TaskResultError<E> {
    #[error(transparent)]
    Wait(#[from] WaitError),

    #[error("task {task_id} finished but processing its result failed")]
    Process {
        task_id: TaskId,
        #[source]
        source: E,
    },
}

impl<E> TaskResultError<E> {
    pub fn is_wait(&self) -> bool {
        matches!(self, TaskResultError::Wait(_))
    }

    pub fn is_process(&self) -> bool {
        matches!(self, TaskResultError::Process { .. })
    }
}

/// Wait for `FINISHED`, then run `processor(task_id)` for its side effect.
pub async fn wait_task_and_process_result<F, P, Fut, E>(
    fetcher: &F,
    task_id: &TaskId,
    stop_on_task_error: bool,
    timeout_secs: u64,
    processor: P,
) -> Result<(), TaskResultError<E>>
where
    F: TaskFetcher + ?Sized,
    P: FnOnce(TaskId) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    let options = WaitOptions::new(timeout_secs, stop_on_task_error);
    wait_task_and_return_result_with(fetcher, task_id, &options, processor).await
}

/// Wait for `FINISHED`, then return whatever `processor(task_id)` produces.
pub async fn wait_task_and_return_result<F, P, Fut, T, E>(
    fetcher: &F,
    task_id: &TaskId,
    stop_on_task_error: bool,
    timeout_secs: u64,
    processor: P,
) -> Result<T, TaskResultError<E>>
where
    F: TaskFetcher + ?Sized,
    P: FnOnce(TaskId) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let options = WaitOptions::new(timeout_secs, stop_on_task_error);
    wait_task_and_return_result_with(fetcher, task_id, &options, processor).await
}

/// [`wait_task_and_process_result`] with full control over the options.
pub async fn wait_task_and_process_result_with<F, P, Fut, E>(
    fetcher: &F,
    task_id: &TaskId,
    options: &WaitOptions,
    processor: P,
) -> Result<(), TaskResultError<E>>
where
    F: TaskFetcher + ?Sized,
    P: FnOnce(TaskId) -> Fut,
    Fut: Future<Output = Result<(), E>>,
{
    wait_task_and_return_result_with(fetcher, task_id, options, processor).await
}

/// [`wait_task_and_return_result`] with full control over the options.
pub async fn wait_task_and_return_result_with<F, P, Fut, T, E>(
    fetcher: &F,
    task_id: &TaskId,
    options: &WaitOptions,
    processor: P,
) -> Result<T, TaskResultError<E>>
where
    F: TaskFetcher + ?Sized,
    P: FnOnce(TaskId) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    wait_for_status(fetcher, task_id, TaskState::Finished, options).await?;

    processor(task_id.clone())
        .await
        .map_err(|source| TaskResultError::Process {
            task_id: task_id.clone(),
            source,
        })
}
