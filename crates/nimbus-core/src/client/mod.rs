//! REST client for the cloud API.
//!
//! One `ApiClient` is built at startup and shared (it is cheap to clone). It
//! implements [`TaskFetcher`](crate::ports::TaskFetcher) against the task
//! endpoint and exposes the generic resource calls the CLI needs.

mod builder;
mod resources;
mod tasks;

pub use builder::{ApiClientBuilder, BuildError};
pub use resources::{ResourcePath, ResourcePathError};

use std::time::Duration;

use log::debug;
use reqwest::Method;
use serde::de::DeserializeOwned;
use ulid::Ulid;
use url::Url;

use crate::domain::{ApiError, ErrorKind};

/// Validated client settings. Built through [`ApiClientBuilder`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: Url,
    pub api_token: Option<String>,
    pub project_id: Option<u64>,
    pub region_id: Option<u64>,
    pub request_timeout: Duration,
    pub user_agent: String,
}

/// HTTP client bound to one API endpoint and credentials.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `api_url` + `segments`, each segment percent-encoded.
    fn endpoint<I, S>(&self, segments: I) -> Result<Url, ApiError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.config.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::new(
                    ErrorKind::Client,
                    format!("api url {} cannot take a path", self.config.api_url),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send one request and decode the JSON body.
    ///
    /// Every request gets a fresh `X-Request-ID` so it can be matched with
    /// server-side logs.
    async fn send<T: DeserializeOwned>(&self, method: Method, url: Url) -> Result<T, ApiError> {
        let request_id = Ulid::new().to_string();
        debug!("{method} {url} request_id={request_id}");

        let mut request = self
            .http
            .request(method.clone(), url.clone())
            .header("X-Request-ID", &request_id);
        if let Some(token) = &self.config.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::transport(format!("{method} {url}: request timed out: {e}"))
            } else if e.is_connect() {
                ApiError::transport(format!("{method} {url}: connection failed: {e}"))
            } else {
                ApiError::transport(format!("{method} {url}: request failed: {e}"))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(format!("{method} {url}: reading body: {e}")))?;
        debug!("{method} {url} -> {status} request_id={request_id}");

        if !status.is_success() {
            return Err(ApiError::from_status(
                status.as_u16(),
                error_message(&body, status),
            ));
        }

        serde_json::from_str(&body)
            .map_err(|e| ApiError::decode(format!("{method} {url}: unexpected response body: {e}")))
    }
}

/// Best effort human message from an error response body.
///
/// The API answers `{"message": "...", "exception_class": "..."}`; anything
/// else falls back to the raw body, then to the status reason.
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(serde_json::Value::String(message)) = map.get(key) {
                return message.clone();
            }
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string()
    } else {
        body.to_string()
    }
}
