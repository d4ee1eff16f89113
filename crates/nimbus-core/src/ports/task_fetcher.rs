//! TaskFetcher port - タスク状態の取得
//!
//! The waiter only needs "read one task by id". The REST client implements it
//! against the task endpoint; tests use `impls::ScriptedTaskFetcher`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ApiError, Task, TaskId};

/// TaskFetcher reads the current snapshot of a task.
///
/// # 設計原則
/// - read-only: 何回呼んでも副作用なし
/// - `Send + Sync`: one fetcher is shared by every concurrent wait
#[async_trait]
pub trait TaskFetcher: Send + Sync {
    async fn get_task(&self, task_id: &TaskId) -> Result<Task, ApiError>;
}

#[async_trait]
impl<F: TaskFetcher + ?Sized> TaskFetcher for &F {
    async fn get_task(&self, task_id: &TaskId) -> Result<Task, ApiError> {
        (**self).get_task(task_id).await
    }
}

#[async_trait]
impl<F: TaskFetcher + ?Sized> TaskFetcher for Arc<F> {
    async fn get_task(&self, task_id: &TaskId) -> Result<Task, ApiError> {
        (**self).get_task(task_id).await
    }
}
