//! Import session state
//!
//! One session per wizard or checked-list import. It holds the user's
//! selection and the job counters; nothing here is persisted.

use scm_import_types::{
    ImportError, ImportJob, ImportSourceKind, ImportableType, ImportedRepository, SourceParameters,
};
use tracing::{debug, warn};

use super::dispatcher::DispatchSummary;

#[derive(Debug, Clone, Default)]
pub struct ImportSession {
    selected_type: Option<ImportableType>,
    selected_source: Option<ImportSourceKind>,
    source_parameters: SourceParameters,
    dispatched_job_count: usize,
    completed_job_count: usize,
    failed_job_count: usize,
    accumulated_results: Vec<ImportedRepository>,
    presented: bool,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_type(&self) -> Option<&ImportableType> {
        self.selected_type.as_ref()
    }

    pub fn selected_source(&self) -> Option<ImportSourceKind> {
        self.selected_source
    }

    pub fn source_parameters(&self) -> &SourceParameters {
        &self.source_parameters
    }

    pub fn dispatched_job_count(&self) -> usize {
        self.dispatched_job_count
    }

    pub fn completed_job_count(&self) -> usize {
        self.completed_job_count
    }

    pub fn failed_job_count(&self) -> usize {
        self.failed_job_count
    }

    pub fn accumulated_results(&self) -> &[ImportedRepository] {
        &self.accumulated_results
    }

    pub fn into_results(self) -> Vec<ImportedRepository> {
        self.accumulated_results
    }

    /// All dispatched jobs have reported success
    pub fn is_complete(&self) -> bool {
        self.dispatched_job_count > 0 && self.completed_job_count == self.dispatched_job_count
    }

    pub fn is_presented(&self) -> bool {
        self.presented
    }

    pub fn summary(&self) -> DispatchSummary {
        DispatchSummary {
            dispatched: self.dispatched_job_count,
            completed: self.completed_job_count,
            failed: self.failed_job_count,
            presented: self.presented,
        }
    }

    /// Choosing a different type drops the source and its details
    pub(crate) fn select_type(&mut self, repository_type: ImportableType) {
        let changed = self
            .selected_type
            .as_ref()
            .map_or(true, |current| current.name != repository_type.name);
        if changed {
            self.clear_source();
        }
        self.selected_type = Some(repository_type);
    }

    /// Choosing a different source drops the details entered for the old one
    pub(crate) fn select_source(&mut self, kind: ImportSourceKind) {
        if self.selected_source != Some(kind) {
            self.source_parameters.clear();
        }
        self.selected_source = Some(kind);
    }

    pub(crate) fn clear_source(&mut self) {
        self.selected_source = None;
        self.source_parameters.clear();
    }

    pub(crate) fn set_parameter(&mut self, field: String, value: String) {
        self.source_parameters.insert(field, value);
    }

    /// The job described by the current selection
    ///
    /// Only the parameters the source requires are sent; directory imports
    /// carry none.
    pub(crate) fn current_job(&self) -> Result<ImportJob, ImportError> {
        let repository_type = self
            .selected_type
            .as_ref()
            .ok_or_else(|| ImportError::InvalidStep("no repository type selected".to_string()))?;
        let source = self
            .selected_source
            .ok_or_else(|| ImportError::InvalidStep("no import source selected".to_string()))?;

        let parameters: SourceParameters = source
            .required_parameters()
            .iter()
            .filter_map(|field| {
                self.source_parameters
                    .get(*field)
                    .map(|value| (field.to_string(), value.clone()))
            })
            .collect();

        let job = ImportJob::new(repository_type.name.clone(), source, parameters);
        job.validate()?;
        Ok(job)
    }

    /// Start a batch of `job_count` jobs
    ///
    /// Must run before any request is issued so that a fast first response
    /// cannot look like the whole batch finishing. Starting a new batch
    /// discards the results of the previous one.
    pub(crate) fn begin_batch(&mut self, job_count: usize) {
        debug!("Starting import batch of {} jobs", job_count);
        self.dispatched_job_count = job_count;
        self.completed_job_count = 0;
        self.failed_job_count = 0;
        self.accumulated_results.clear();
        self.presented = false;
    }

    /// Record a successful job
    pub(crate) fn record_completion(&mut self, repositories: Vec<ImportedRepository>) {
        if self.completed_job_count >= self.dispatched_job_count {
            warn!(
                "Ignoring import result of {} repositories: all {} jobs already completed",
                repositories.len(),
                self.dispatched_job_count
            );
            return;
        }

        self.accumulated_results.extend(repositories);
        self.completed_job_count += 1;
        debug!(
            "Import job finished ({}/{})",
            self.completed_job_count, self.dispatched_job_count
        );
    }

    /// Record a failed job. It never counts as completed.
    pub(crate) fn record_failure(&mut self) {
        self.failed_job_count += 1;
    }

    /// Claim the one presentation of this batch
    pub(crate) fn mark_presented(&mut self) -> bool {
        if !self.is_complete() || self.presented {
            return false;
        }
        self.presented = true;
        true
    }
}
