//! User-facing notifications
//!
//! Failures never abort a session. They are turned into a [`Notification`]
//! and handed to whatever [`Notifier`] the front-end installed.

use serde::Serialize;

use crate::error::RestError;

/// Error notice shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&RestError> for Notification {
    fn from(error: &RestError) -> Self {
        match error {
            RestError::Status { failure, .. } => {
                Notification::new(failure.title.clone(), failure.message.clone())
            }
            RestError::Transport(e) => Notification::new("Connection Error", e.to_string()),
            RestError::Decode { message, .. } => Notification::new("Invalid Response", message),
            RestError::InvalidUrl(msg) => Notification::new("Invalid URL", msg),
        }
    }
}

/// Sink for error notifications
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

