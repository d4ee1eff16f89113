//! Task model: the JSON shape returned by the task endpoint.
//!
//! Everything here is an immutable DTO. The client only ever reads tasks;
//! all state transitions happen server-side.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{TaskId, TaskState};

/// Snapshot of an asynchronous operation as reported by the remote system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub state: TaskState,

    /// Error text. May be set while the task is still running (a soft error)
    /// or together with `TaskState::Error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Ids of the resources this task created, grouped by resource kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_resources: Option<CreatedResources>,

    /// Operation specific payload (e.g. attach results).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Map<String, serde_json::Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp")]
    pub finished_on: Option<DateTime<Utc>>,
}

impl Task {
    /// Minimal snapshot, mostly useful for tests and fakes.
    pub fn new(id: impl Into<TaskId>, state: TaskState) -> Self {
        Self {
            id: id.into(),
            state,
            error: None,
            created_resources: None,
            data: None,
            task_type: None,
            project_id: None,
            region_id: None,
            user_id: None,
            created_on: None,
            finished_on: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_created_resources(mut self, created: CreatedResources) -> Self {
        self.created_resources = Some(created);
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Decode `data` into a caller supplied shape. `Ok(None)` when the task
    /// carries no data.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<Option<T>, serde_json::Error> {
        self.data
            .as_ref()
            .map(|data| serde_json::from_value(serde_json::Value::Object(data.clone())))
            .transpose()
    }
}

/// `created_resources` of a task: resource kind -> list of ids.
///
/// ```json
/// { "k8s_clusters": ["6bf878c1-1ce4-47c3-a39b-6b5f1d79bf25"], "k8s_pools": [] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatedResources(BTreeMap<String, serde_json::Value>);

impl CreatedResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add ids under `kind` (builder style, used by fakes and tests).
    pub fn with(mut self, kind: impl Into<String>, ids: &[&str]) -> Self {
        self.0.insert(kind.into(), serde_json::json!(ids));
        self
    }

    /// Ids listed under `kind`. A bare string value counts as a single id;
    /// anything else that is not a string is skipped.
    pub fn ids(&self, kind: &str) -> Vec<&str> {
        match self.0.get(kind) {
            Some(serde_json::Value::Array(items)) => {
                items.iter().filter_map(serde_json::Value::as_str).collect()
            }
            Some(serde_json::Value::String(id)) => vec![id.as_str()],
            _ => Vec::new(),
        }
    }

    pub fn first_id(&self, kind: &str) -> Option<&str> {
        self.ids(kind).into_iter().next()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Decode the whole map into a typed struct, e.g.
    /// `struct ClusterTaskResult { k8s_clusters: Vec<String> }`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let value = serde_json::to_value(&self.0)?;
        serde_json::from_value(value)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskResultsError {
    #[error("no tasks in response")]
    Empty,

    #[error("expected one task in response, got {0}")]
    Multiple(usize),
}

/// Tasks spawned by one mutating API call.
///
/// Observed in practice as exactly one, but the shape allows more.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskResults {
    pub tasks: Vec<TaskId>,
}

impl TaskResults {
    pub fn new(tasks: Vec<TaskId>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TaskId> {
        self.tasks.iter()
    }

    /// The task id of a call that spawns exactly one task.
    pub fn single(&self) -> Result<&TaskId, TaskResultsError> {
        match self.tasks.as_slice() {
            [] => Err(TaskResultsError::Empty),
            [task_id] => Ok(task_id),
            many => Err(TaskResultsError::Multiple(many.len())),
        }
    }
}

impl<'a> IntoIterator for &'a TaskResults {
    type Item = &'a TaskId;
    type IntoIter = std::slice::Iter<'a, TaskId>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

/// Task timestamps come either as RFC 3339 or without a zone
/// (`2020-03-10T14:50:38`, treated as UTC).
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_some(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        raw.map(|s| parse(&s).map_err(serde::de::Error::custom))
            .transpose()
    }

    pub(super) fn parse(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
            return Ok(ts.with_timezone(&Utc));
        }
        if let Ok(ts) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
            return Ok(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc())
    }
}
