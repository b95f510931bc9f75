//! Import job dispatch
//!
//! Fans a batch of jobs out to the backend and folds the responses back into
//! the session as they arrive.

use futures::stream::{FuturesUnordered, StreamExt};
use scm_core::{Notification, Notifier};
use scm_import_types::{ImportBackend, ImportJob};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::presenter::ResultPresenter;
use super::session::ImportSession;
use super::ImportServiceError;

/// Counters of a dispatched batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchSummary {
    pub dispatched: usize,
    pub completed: usize,
    pub failed: usize,
    pub presented: bool,
}

impl DispatchSummary {
    pub fn is_complete(&self) -> bool {
        self.dispatched > 0 && self.completed == self.dispatched
    }
}

#[derive(Clone)]
pub struct ImportDispatcher {
    backend: Arc<dyn ImportBackend>,
}

impl ImportDispatcher {
    pub fn new(backend: Arc<dyn ImportBackend>) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &Arc<dyn ImportBackend> {
        &self.backend
    }

    /// Issue one request per job and wait for all of them to settle
    ///
    /// The dispatch count is fixed before the first request goes out. Requests
    /// run concurrently but responses are applied one at a time, in arrival
    /// order, on the calling task. A failed job is reported through `notifier`
    /// and never counts as completed; nothing is retried.
    pub async fn dispatch(
        &self,
        session: &mut ImportSession,
        jobs: Vec<ImportJob>,
        presenter: &mut ResultPresenter,
        notifier: &dyn Notifier,
    ) -> DispatchSummary {
        session.begin_batch(jobs.len());
        info!("Dispatching {} import jobs", jobs.len());

        let backend = &self.backend;
        let mut pending: FuturesUnordered<_> = jobs
            .iter()
            .map(|job| async move { (job, backend.import_repositories(job).await) })
            .collect();

        while let Some((job, result)) = pending.next().await {
            match result {
                Ok(repositories) => {
                    debug!(
                        "Import of {} from {} returned {} repositories",
                        job.repository_type,
                        job.source,
                        repositories.len()
                    );
                    session.record_completion(repositories);
                    presenter.present_if_complete(session);
                }
                Err(e) => {
                    warn!(
                        "Import of {} from {} failed: {}",
                        job.repository_type, job.source, e
                    );
                    session.record_failure();
                    notifier.notify(Notification::from(ImportServiceError::from(e)));
                }
            }
        }

        let summary = session.summary();
        if !summary.is_complete() {
            warn!(
                "Import incomplete: {} of {} jobs completed, {} failed",
                summary.completed, summary.dispatched, summary.failed
            );
        }
        summary
    }
}
