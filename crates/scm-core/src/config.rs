//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::{RestError, RestResult};

/// Default REST base of a local server
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/scm/api/rest";

pub const SERVER_URL_ENV: &str = "SCM_SERVER_URL";
pub const API_TOKEN_ENV: &str = "SCM_API_TOKEN";
pub const REQUEST_TIMEOUT_ENV: &str = "SCM_REQUEST_TIMEOUT";

/// Connection settings for the REST backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every REST path is resolved against
    pub server_url: String,
    /// Bearer token sent with every request
    pub api_token: Option<String>,
    /// Per-request timeout. `None` keeps the transport default.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            api_token: None,
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            ..Self::default()
        }
    }

    /// Build a configuration from `SCM_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let server_url =
            std::env::var(SERVER_URL_ENV).unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        let api_token = std::env::var(API_TOKEN_ENV)
            .ok()
            .filter(|token| !token.trim().is_empty());
        let request_timeout = std::env::var(REQUEST_TIMEOUT_ENV)
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        Self {
            server_url,
            api_token,
            request_timeout,
        }
    }

    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Resolve a path relative to the REST base
    ///
    /// The base is treated as a directory, so `http://host/scm/api/rest` and
    /// `http://host/scm/api/rest/` resolve `import/repositories.json` the same way.
    pub fn endpoint(&self, path: &str) -> RestResult<Url> {
        let base = if self.server_url.ends_with('/') {
            self.server_url.clone()
        } else {
            format!("{}/", self.server_url)
        };

        let base = Url::parse(&base)
            .map_err(|e| RestError::InvalidUrl(format!("{}: {}", self.server_url, e)))?;

        base.join(path.trim_start_matches('/'))
            .map_err(|e| RestError::InvalidUrl(format!("{}: {}", path, e)))
    }
}
