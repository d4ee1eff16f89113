//! Task endpoint: `GET v1/tasks/{task_id}`.

use async_trait::async_trait;
use reqwest::Method;

use super::ApiClient;
use crate::domain::{ApiError, Task, TaskId};
use crate::ports::TaskFetcher;

#[async_trait]
impl TaskFetcher for ApiClient {
    async fn get_task(&self, task_id: &TaskId) -> Result<Task, ApiError> {
        let url = self.endpoint(["v1", "tasks", task_id.as_str()])?;
        self.send(Method::GET, url).await
    }
}
