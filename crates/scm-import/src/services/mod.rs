//! Import workflow services

mod coordinator;
mod dispatcher;
mod presenter;
mod session;
mod wizard;

#[cfg(test)]
pub(crate) mod test_support;

pub use coordinator::ImportCoordinator;
pub use dispatcher::{DispatchSummary, ImportDispatcher};
pub use presenter::{RepositoryListing, ResultPresenter, ResultView};
pub use session::ImportSession;
pub use wizard::{ImportWizard, WizardDirection, WizardStep};

use scm_core::{Notification, RestError};
use scm_import_types::ImportError;
use thiserror::Error;

/// Import service errors
#[derive(Error, Debug)]
pub enum ImportServiceError {
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Request error: {0}")]
    Rest(#[from] RestError),
}

/// Result type for import services
pub type ImportServiceResult<T> = Result<T, ImportServiceError>;

impl From<ImportServiceError> for Notification {
    fn from(error: ImportServiceError) -> Self {
        match error {
            ImportServiceError::Import(ImportError::Backend { title, message }) => {
                Notification::new(title, message)
            }
            ImportServiceError::Import(ImportError::UnknownRepositoryType(name)) => {
                Notification::new(
                    "Unknown Repository Type",
                    format!("The server cannot import repositories of type {}", name),
                )
            }
            ImportServiceError::Import(ImportError::UnknownSource(source)) => {
                Notification::new("Unknown Import Source", source)
            }
            ImportServiceError::Import(e @ ImportError::UnsupportedSource { .. }) => {
                Notification::new("Unsupported Import Source", e.to_string())
            }
            ImportServiceError::Import(ImportError::MissingParameter(field)) => {
                Notification::new("Missing Parameter", format!("Please enter a value for {}", field))
            }
            ImportServiceError::Import(ImportError::InvalidStep(msg)) => {
                Notification::new("Invalid Step", msg)
            }
            ImportServiceError::Import(ImportError::SerializationError(e)) => {
                Notification::new("Invalid Response", e.to_string())
            }
            ImportServiceError::Rest(e) => Notification::from(&e),
        }
    }
}
