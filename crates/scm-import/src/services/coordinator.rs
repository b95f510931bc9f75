//! Import coordinator
//!
//! Entry point for both ways of importing: the wizard (one type, one source)
//! and the checked list (every checked type from its repository directory).
//! Both go through the same dispatcher and session bookkeeping.

use scm_core::Notifier;
use scm_import_types::{ImportBackend, ImportJob, ImportableType};
use std::sync::Arc;
use tracing::{debug, info};

use super::dispatcher::ImportDispatcher;
use super::presenter::ResultPresenter;
use super::session::ImportSession;
use super::wizard::ImportWizard;
use super::ImportServiceResult;

#[derive(Clone)]
pub struct ImportCoordinator {
    dispatcher: ImportDispatcher,
    notifier: Arc<dyn Notifier>,
}

impl ImportCoordinator {
    pub fn new(backend: Arc<dyn ImportBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            dispatcher: ImportDispatcher::new(backend),
            notifier,
        }
    }

    /// Repository types the server can import
    pub async fn importable_types(&self) -> ImportServiceResult<Vec<ImportableType>> {
        let types = self.dispatcher.backend().importable_types().await?;
        debug!("Server reports {} importable types", types.len());
        Ok(types)
    }

    /// Open a wizard over the server's current importable types
    pub async fn open_wizard(&self, presenter: ResultPresenter) -> ImportServiceResult<ImportWizard> {
        let types = self.importable_types().await?;
        Ok(ImportWizard::new(
            types,
            self.dispatcher.clone(),
            presenter,
            self.notifier.clone(),
        ))
    }

    /// Import every checked type from its repository directory
    ///
    /// One request per checked type, all in flight together. The returned
    /// session holds the counters and whatever was imported; when any job
    /// failed it never reports completion.
    pub async fn import_checked(
        &self,
        checked: &[ImportableType],
        presenter: &mut ResultPresenter,
    ) -> ImportSession {
        let jobs: Vec<ImportJob> = checked
            .iter()
            .map(|t| ImportJob::directory(t.name.clone()))
            .collect();

        info!(
            "Importing checked repository types: {}",
            checked
                .iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        let mut session = ImportSession::new();
        self.dispatcher
            .dispatch(&mut session, jobs, presenter, self.notifier.as_ref())
            .await;
        session
    }
}
