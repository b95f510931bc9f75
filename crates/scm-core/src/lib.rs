//! Core utilities and types shared across the SCM admin crates
//!
//! - **config**: where the REST backend lives and how to authenticate
//! - **rest**: a small JSON client over `reqwest`
//! - **notification**: user-facing error notices (title + message)

pub mod config;
pub mod error;
pub mod notification;
pub mod rest;

pub use config::ClientConfig;
pub use error::{RestError, RestFailure, RestResult};
pub use notification::{Notification, Notifier};
pub use rest::RestClient;

// Re-export external dependencies
pub use anyhow;
pub use serde;
pub use serde_json;
pub use thiserror;
pub use tracing;
