//! Core types and traits for the SCM repository import workflow
//!
//! # Architecture
//!
//! - **Types**: `ImportableType`, `ImportSourceKind`, `ImportJob`, `ImportedRepository`
//! - **Traits**: `ImportBackend` is the seam between the workflow and the server
//! - **Errors**: unified error handling for the import workflow
//!
//! # Usage
//!
//! `scm-import` drives the workflow against any `ImportBackend`; the REST
//! implementation lives there too.

pub mod backend;
pub mod error;
pub mod repository;
pub mod source;

pub use backend::ImportBackend;
pub use error::{ImportError, ImportResult};
pub use repository::{Command, ImportableType, ImportedRepository};
pub use source::{ImportJob, ImportSourceKind, SourceOption, SourceParameters};
