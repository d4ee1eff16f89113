//! ApiClientBuilder - クライアントの構築と設定検証
//!
//! Fail-fast: a bad URL or an unusable HTTP stack is reported by `build()`,
//! not by the first request.

use std::time::Duration;

use url::Url;

use super::{ApiClient, ClientConfig};

/// BuildError はクライアント構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("api url is not set")]
    MissingApiUrl,

    #[error("invalid api url {url:?}")]
    InvalidApiUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("api url {0} must use http or https")]
    UnsupportedScheme(String),

    #[error("failed to initialise http client")]
    Http(#[source] reqwest::Error),
}

/// Builder for [`ApiClient`].
///
/// # 使用例
/// ```ignore
/// let client = ApiClient::builder()
///     .api_url("https://api.example.com/cloud")
///     .api_token(token)
///     .project_id(1)
///     .region_id(76)
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct ApiClientBuilder {
    api_url: Option<String>,
    api_token: Option<String>,
    project_id: Option<u64>,
    region_id: Option<u64>,
    request_timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ApiClientBuilder {
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Sent as `Authorization: Bearer <token>`. Empty tokens are ignored.
    pub fn api_token(mut self, api_token: impl Into<String>) -> Self {
        let token = api_token.into();
        self.api_token = (!token.is_empty()).then_some(token);
        self
    }

    pub fn project_id(mut self, project_id: u64) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn region_id(mut self, region_id: u64) -> Self {
        self.region_id = Some(region_id);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<ApiClient, BuildError> {
        let raw = self.api_url.ok_or(BuildError::MissingApiUrl)?;
        let api_url = Url::parse(&raw).map_err(|source| BuildError::InvalidApiUrl {
            url: raw.clone(),
            source,
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(BuildError::UnsupportedScheme(raw));
        }

        let config = ClientConfig {
            api_url,
            api_token: self.api_token,
            project_id: self.project_id,
            region_id: self.region_id,
            request_timeout: self
                .request_timeout
                .unwrap_or(Self::DEFAULT_REQUEST_TIMEOUT),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| format!("nimbus/{}", env!("CARGO_PKG_VERSION"))),
        };

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(BuildError::Http)?;

        Ok(ApiClient { http, config })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_with_defaults() {
        let client = ApiClientBuilder::new()
            .api_url("https://api.example.com")
            .api_token("secret")
            .project_id(1)
            .region_id(76)
            .build()
            .unwrap();

        let config = client.config();
        assert_eq!(config.api_url.as_str(), "https://api.example.com/");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.project_id, Some(1));
        assert_eq!(config.region_id, Some(76));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("nimbus/"));
    }

    #[test]
    fn build_missing_url() {
        let err = ApiClientBuilder::new().build().unwrap_err();
        assert!(matches!(err, BuildError::MissingApiUrl));
    }

    #[test]
    fn build_invalid_url() {
        let err = ApiClientBuilder::new().api_url("not a url").build().unwrap_err();
        assert!(matches!(err, BuildError::InvalidApiUrl { .. }));
    }

    #[test]
    fn build_rejects_other_schemes() {
        let err = ApiClientBuilder::new()
            .api_url("ftp://api.example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedScheme(_)));
    }

    #[test]
    fn empty_token_is_no_token() {
        let client = ApiClientBuilder::new()
            .api_url("http://localhost:8080")
            .api_token("")
            .build()
            .unwrap();
        assert_eq!(client.config().api_token, None);
    }
}
