//! Generic resource calls: `v1/{path}/{project_id}/{region_id}/{id}`.
//!
//! Only what the waiter's callers need: show one resource (to print it or to
//! confirm it is gone) and delete one resource (which spawns a task).

use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use thiserror::Error;

use super::ApiClient;
use crate::domain::{ApiError, ErrorKind, ResourceId, TaskResults};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourcePathError {
    #[error("resource path is empty")]
    Empty,

    #[error("resource path {0:?} has an empty segment")]
    EmptySegment(String),

    #[error("resource path {0:?} contains whitespace")]
    Whitespace(String),
}

/// Resource collection below `v1/`, e.g. `routers` or `k8s/clusters`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }
}

impl FromStr for ResourcePath {
    type Err = ResourcePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ResourcePathError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(ResourcePathError::Whitespace(s.to_string()));
        }
        let segments: Vec<String> = s.split('/').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(ResourcePathError::EmptySegment(s.to_string()));
        }
        Ok(Self { segments })
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl ApiClient {
    /// Fetch one resource as raw JSON.
    pub async fn get_resource(
        &self,
        resource: &ResourcePath,
        id: &ResourceId,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.resource_url(resource, id)?;
        self.send(Method::GET, url).await
    }

    /// Request deletion. The API answers with the task(s) doing the work.
    pub async fn delete_resource(
        &self,
        resource: &ResourcePath,
        id: &ResourceId,
    ) -> Result<TaskResults, ApiError> {
        let url = self.resource_url(resource, id)?;
        self.send(Method::DELETE, url).await
    }

    fn resource_url(&self, resource: &ResourcePath, id: &ResourceId) -> Result<url::Url, ApiError> {
        let (Some(project_id), Some(region_id)) = (self.config.project_id, self.config.region_id)
        else {
            return Err(ApiError::new(
                ErrorKind::Client,
                format!("project and region must be configured to access {resource}"),
            ));
        };
        let (project_id, region_id) = (project_id.to_string(), region_id.to_string());

        let mut segments: Vec<&str> = vec!["v1"];
        segments.extend(resource.segments());
        segments.extend([project_id.as_str(), region_id.as_str(), id.as_str()]);
        self.endpoint(segments)
    }
}
