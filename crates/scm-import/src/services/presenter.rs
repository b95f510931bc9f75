//! Result presentation
//!
//! Shows what a finished batch imported and tells the repository listing to
//! reload.

use scm_import_types::ImportedRepository;
use tracing::{debug, info};

use super::session::ImportSession;

/// Renders imported repositories (columns: name, type)
pub trait ResultView: Send {
    fn render(&mut self, repositories: &[ImportedRepository]);
}

/// A view listing the server's repositories
pub trait RepositoryListing: Send {
    fn refresh(&mut self);
}

pub struct ResultPresenter {
    view: Box<dyn ResultView>,
    listing: Option<Box<dyn RepositoryListing>>,
}

impl ResultPresenter {
    pub fn new(view: Box<dyn ResultView>) -> Self {
        Self {
            view,
            listing: None,
        }
    }

    pub fn with_listing(mut self, listing: Box<dyn RepositoryListing>) -> Self {
        self.listing = Some(listing);
        self
    }

    /// Present the session's results if its batch just completed
    ///
    /// Fires at most once per batch; returns whether it fired.
    pub fn present_if_complete(&mut self, session: &mut ImportSession) -> bool {
        if !session.mark_presented() {
            debug!(
                "Not presenting: {}/{} jobs completed",
                session.completed_job_count(),
                session.dispatched_job_count()
            );
            return false;
        }

        info!(
            "Import of {} jobs finished, {} repositories imported",
            session.completed_job_count(),
            session.accumulated_results().len()
        );

        self.view.render(session.accumulated_results());
        if let Some(listing) = self.listing.as_mut() {
            listing.refresh();
        }
        true
    }
}
