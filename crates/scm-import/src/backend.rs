//! REST implementation of the import backend

use async_trait::async_trait;
use scm_core::{Notification, RestClient, RestError};
use scm_import_types::{
    ImportBackend, ImportError, ImportJob, ImportResult, ImportSourceKind, ImportableType,
    ImportedRepository,
};
use tracing::debug;

const IMPORT_TYPES_PATH: &str = "import/repositories.json";

/// Imports repositories through the server's `import/repositories` resource
#[derive(Debug, Clone)]
pub struct RestImportBackend {
    client: RestClient,
}

impl RestImportBackend {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Resource path for one job
    ///
    /// Directory imports post to `{type}.json`, the other sources to a
    /// sub-resource named after the command that performs them.
    fn import_path(job: &ImportJob) -> String {
        let repository_type = urlencoding::encode(&job.repository_type);
        match job.source {
            ImportSourceKind::Directory => format!("import/repositories/{}.json", repository_type),
            ImportSourceKind::Url => format!("import/repositories/{}/url.json", repository_type),
            ImportSourceKind::File => {
                format!("import/repositories/{}/bundle.json", repository_type)
            }
        }
    }
}

fn backend_error(error: RestError) -> ImportError {
    let notification = Notification::from(&error);
    ImportError::Backend {
        title: notification.title,
        message: notification.message,
    }
}

#[async_trait]
impl ImportBackend for RestImportBackend {
    async fn importable_types(&self) -> ImportResult<Vec<ImportableType>> {
        self.client
            .get_json(IMPORT_TYPES_PATH)
            .await
            .map_err(backend_error)
    }

    async fn import_repositories(&self, job: &ImportJob) -> ImportResult<Vec<ImportedRepository>> {
        let path = Self::import_path(job);
        debug!("Posting import job to {}", path);

        let result: Result<Vec<ImportedRepository>, RestError> = match job.source {
            ImportSourceKind::Directory => self.client.post_empty(&path).await,
            ImportSourceKind::Url | ImportSourceKind::File => {
                self.client.post_json(&path, &job.parameters).await
            }
        };

        result.map_err(backend_error)
    }
}
