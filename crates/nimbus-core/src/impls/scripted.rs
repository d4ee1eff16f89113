//! ScriptedTaskFetcher - テスト・開発用の TaskFetcher
//!
//! Replays a fixed sequence of task snapshots (or fetch errors) per task id.
//! Once a script runs out, the last step repeats forever, which models a task
//! that stays in its final observed state.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{ApiError, Task, TaskId, TaskState};
use crate::ports::TaskFetcher;

struct Script {
    steps: Vec<Result<Task, ApiError>>,
    fetches: usize,
}

/// In-memory fetcher replaying scripted task snapshots.
///
/// # 使用例
/// ```ignore
/// let fetcher = ScriptedTaskFetcher::from_states(
///     "t-1",
///     &[TaskState::New, TaskState::Running, TaskState::Finished],
/// );
/// wait_for_status(&fetcher, &"t-1".into(), TaskState::Finished, &options).await?;
/// assert_eq!(fetcher.fetch_count(&"t-1".into()), 3);
/// ```
#[derive(Default)]
pub struct ScriptedTaskFetcher {
    scripts: Mutex<HashMap<TaskId, Script>>,
}

impl ScriptedTaskFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// One task walking through `states` (no error text).
    pub fn from_states(task_id: impl Into<TaskId>, states: &[TaskState]) -> Self {
        let task_id = task_id.into();
        let steps = states
            .iter()
            .map(|state| Ok(Task::new(task_id.clone(), *state)))
            .collect();
        Self::new().script(task_id, steps)
    }

    /// Register (or replace) the script for `task_id`.
    pub fn script(self, task_id: impl Into<TaskId>, steps: Vec<Result<Task, ApiError>>) -> Self {
        {
            let mut scripts = self
                .scripts
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            scripts.insert(task_id.into(), Script { steps, fetches: 0 });
        }
        self
    }

    /// How many times `task_id` has been fetched so far.
    pub fn fetch_count(&self, task_id: &TaskId) -> usize {
        let scripts = self
            .scripts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        scripts.get(task_id).map_or(0, |script| script.fetches)
    }

    pub fn total_fetches(&self) -> usize {
        let scripts = self
            .scripts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        scripts.values().map(|script| script.fetches).sum()
    }
}

#[async_trait]
impl TaskFetcher for ScriptedTaskFetcher {
    async fn get_task(&self, task_id: &TaskId) -> Result<Task, ApiError> {
        // ロックは await を跨がない
        let mut scripts = self
            .scripts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let Some(script) = scripts.get_mut(task_id) else {
            return Err(ApiError::not_found(format!("task {task_id} not found")));
        };
        let Some(last) = script.steps.len().checked_sub(1) else {
            return Err(ApiError::not_found(format!("task {task_id} not found")));
        };

        let step = script.steps[script.fetches.min(last)].clone();
        script.fetches += 1;
        step
    }
}
