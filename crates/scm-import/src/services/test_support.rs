//! In-memory doubles for the import services tests

use async_trait::async_trait;
use scm_core::{Notification, Notifier};
use scm_import_types::{
    ImportBackend, ImportError, ImportJob, ImportResult, ImportableType, ImportedRepository,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::presenter::{RepositoryListing, ResultView};

#[derive(Clone, Default)]
pub struct RecordingView {
    renders: Arc<Mutex<Vec<Vec<ImportedRepository>>>>,
}

impl RecordingView {
    pub fn renders(&self) -> Vec<Vec<ImportedRepository>> {
        self.renders.lock().unwrap().clone()
    }
}

impl ResultView for RecordingView {
    fn render(&mut self, repositories: &[ImportedRepository]) {
        self.renders.lock().unwrap().push(repositories.to_vec());
    }
}

#[derive(Clone, Default)]
pub struct RecordingListing {
    refreshes: Arc<AtomicUsize>,
}

impl RecordingListing {
    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

impl RepositoryListing for RecordingListing {
    fn refresh(&mut self) {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

#[derive(Clone)]
pub enum MockOutcome {
    Success(Vec<ImportedRepository>),
    Failure { title: String, message: String },
}

/// Backend answering each repository type after a fixed delay
#[derive(Default)]
pub struct MockBackend {
    types: Vec<ImportableType>,
    responses: HashMap<String, (Duration, MockOutcome)>,
    received: Mutex<Vec<ImportJob>>,
}

impl MockBackend {
    pub fn new(types: Vec<ImportableType>) -> Self {
        Self {
            types,
            ..Self::default()
        }
    }

    pub fn succeed(mut self, repository_type: &str, delay_ms: u64, names: &[&str]) -> Self {
        let repositories = names
            .iter()
            .map(|name| ImportedRepository::new(repository_type, *name))
            .collect();
        self.responses.insert(
            repository_type.to_string(),
            (
                Duration::from_millis(delay_ms),
                MockOutcome::Success(repositories),
            ),
        );
        self
    }

    pub fn fail(mut self, repository_type: &str, delay_ms: u64, message: &str) -> Self {
        self.responses.insert(
            repository_type.to_string(),
            (
                Duration::from_millis(delay_ms),
                MockOutcome::Failure {
                    title: "Import Failed".to_string(),
                    message: message.to_string(),
                },
            ),
        );
        self
    }

    pub fn received_jobs(&self) -> Vec<ImportJob> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImportBackend for MockBackend {
    async fn importable_types(&self) -> ImportResult<Vec<ImportableType>> {
        Ok(self.types.clone())
    }

    async fn import_repositories(&self, job: &ImportJob) -> ImportResult<Vec<ImportedRepository>> {
        self.received.lock().unwrap().push(job.clone());

        let (delay, outcome) = self
            .responses
            .get(&job.repository_type)
            .cloned()
            .ok_or_else(|| ImportError::Backend {
                title: "Not Found".to_string(),
                message: format!("no handler for {}", job.repository_type),
            })?;

        tokio::time::sleep(delay).await;

        match outcome {
            MockOutcome::Success(repositories) => Ok(repositories),
            MockOutcome::Failure { title, message } => Err(ImportError::Backend { title, message }),
        }
    }
}
