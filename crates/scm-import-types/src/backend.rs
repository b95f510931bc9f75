//! Import backend trait
//!
//! The seam between the import workflow and whatever actually performs the
//! import. The workflow never talks HTTP directly.

use async_trait::async_trait;

use crate::{
    error::ImportResult,
    repository::{ImportableType, ImportedRepository},
    source::ImportJob,
};

#[async_trait]
pub trait ImportBackend: Send + Sync {
    /// Repository types the server can import
    async fn importable_types(&self) -> ImportResult<Vec<ImportableType>>;

    /// Run one import job
    ///
    /// Exactly one request per call. The returned repositories keep the order
    /// the server reported them in.
    async fn import_repositories(&self, job: &ImportJob) -> ImportResult<Vec<ImportedRepository>>;
}
