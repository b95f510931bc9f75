//! SCM Repository Import
//!
//! Coordinates repository imports against an SCM server.
//!
//! # Architecture
//!
//! - **Backend**: `RestImportBackend`, the HTTP implementation of `ImportBackend`
//! - **Services**: session bookkeeping, job dispatch, result presentation and
//!   the step-by-step import wizard
//!
//! # Usage
//!
//! Build an `ImportCoordinator` around a backend, then either open a wizard
//! for one type/source pair or import a checked list of types from their
//! repository directories.

pub mod backend;
pub mod services;

pub use backend::RestImportBackend;
pub use services::{
    DispatchSummary, ImportCoordinator, ImportDispatcher, ImportServiceError,
    ImportServiceResult, ImportSession, ImportWizard, RepositoryListing, ResultPresenter,
    ResultView, WizardDirection, WizardStep,
};
