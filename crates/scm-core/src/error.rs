//! Error types for REST calls against the SCM server

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Result type alias for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// Errors raised at the request boundary
#[derive(Error, Debug)]
pub enum RestError {
    /// Network or transport failure, no response received
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("Server returned {status}: {}", .failure.message)]
    Status {
        status: StatusCode,
        failure: RestFailure,
    },

    /// Response body was not the JSON we expected
    #[error("Failed to decode response: {message}")]
    Decode { message: String, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Title and message of a failed request, taken from the failure payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestFailure {
    pub title: String,
    pub message: String,
}

/// Shapes of error bodies the server is known to send
#[derive(Debug, Deserialize)]
struct FailurePayload {
    title: Option<String>,
    detail: Option<String>,
    message: Option<String>,
}

impl RestFailure {
    /// Build a failure from a status and raw response body
    ///
    /// JSON bodies with `title`, `detail` or `message` fields win; otherwise the
    /// status reason is the title and the body (or the status line) the message.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let fallback_title = status
            .canonical_reason()
            .unwrap_or("Request Failed")
            .to_string();

        if let Ok(payload) = serde_json::from_str::<FailurePayload>(body) {
            let message = payload.detail.or(payload.message);
            if payload.title.is_some() || message.is_some() {
                return Self {
                    title: payload.title.unwrap_or(fallback_title),
                    message: message.unwrap_or_else(|| status.to_string()),
                };
            }
        }

        let trimmed = body.trim();
        Self {
            title: fallback_title,
            message: if trimmed.is_empty() {
                status.to_string()
            } else {
                trimmed.to_string()
            },
        }
    }
}
