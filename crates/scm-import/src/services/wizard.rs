//! Step-by-step import wizard
//!
//! Choose a repository type, choose where to import from, enter the source
//! details when the source needs any, run the import and show the result.

use scm_core::Notifier;
use scm_import_types::{
    ImportError, ImportSourceKind, ImportableType, ImportedRepository, SourceOption,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use super::dispatcher::ImportDispatcher;
use super::presenter::ResultPresenter;
use super::session::ImportSession;
use super::ImportServiceResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    ChooseRepositoryType,
    ChooseImportSource,
    EnterSourceDetails,
    Importing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardDirection {
    Forward,
    Backward,
}

/// What `advance` would do from a given step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    Reject,
    MoveTo(WizardStep),
    Execute,
}

fn transition(step: WizardStep, direction: WizardDirection, session: &ImportSession) -> Transition {
    use WizardDirection::*;
    use WizardStep::*;

    match (step, direction) {
        (ChooseRepositoryType, Forward) if session.selected_type().is_some() => {
            Transition::MoveTo(ChooseImportSource)
        }
        (ChooseImportSource, Backward) => Transition::MoveTo(ChooseRepositoryType),
        (ChooseImportSource, Forward) => match session.selected_source() {
            Some(kind) if kind.needs_parameters() => Transition::MoveTo(EnterSourceDetails),
            Some(_) => Transition::Execute,
            None => Transition::Reject,
        },
        (EnterSourceDetails, Backward) => Transition::MoveTo(ChooseImportSource),
        (EnterSourceDetails, Forward) => match session.selected_source() {
            Some(kind) if kind.missing_parameter(session.source_parameters()).is_none() => {
                Transition::Execute
            }
            _ => Transition::Reject,
        },
        _ => Transition::Reject,
    }
}

pub struct ImportWizard {
    types: Vec<ImportableType>,
    session: ImportSession,
    step: WizardStep,
    dispatcher: ImportDispatcher,
    presenter: ResultPresenter,
    notifier: Arc<dyn Notifier>,
}

impl ImportWizard {
    pub fn new(
        types: Vec<ImportableType>,
        dispatcher: ImportDispatcher,
        presenter: ResultPresenter,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            types,
            session: ImportSession::new(),
            step: WizardStep::ChooseRepositoryType,
            dispatcher,
            presenter,
            notifier,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn session(&self) -> &ImportSession {
        &self.session
    }

    pub fn importable_types(&self) -> &[ImportableType] {
        &self.types
    }

    /// Source kinds offered for the selected type
    ///
    /// Empty until a type is selected. Url needs `PULL`, file needs `UNBUNDLE`.
    pub fn source_options(&self) -> Vec<SourceOption> {
        self.session
            .selected_type()
            .map(ImportableType::source_options)
            .unwrap_or_default()
    }

    pub fn select_repository_type(&mut self, name: &str) -> ImportServiceResult<()> {
        self.expect_step(WizardStep::ChooseRepositoryType)?;

        let repository_type = self
            .types
            .iter()
            .find(|t| t.name == name)
            .cloned()
            .ok_or_else(|| ImportError::UnknownRepositoryType(name.to_string()))?;

        debug!("Selected repository type {}", repository_type.name);
        self.session.select_type(repository_type);
        Ok(())
    }

    /// Choose the import source
    ///
    /// Disabled options are filtered out by whoever renders
    /// [`source_options`](Self::source_options); this does not check again.
    pub fn select_import_source(&mut self, kind: ImportSourceKind) -> ImportServiceResult<()> {
        self.expect_step(WizardStep::ChooseImportSource)?;
        debug!("Selected import source {}", kind);
        self.session.select_source(kind);
        Ok(())
    }

    pub fn set_source_parameter(
        &mut self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> ImportServiceResult<()> {
        self.expect_step(WizardStep::EnterSourceDetails)?;
        self.session.set_parameter(field.into(), value.into());
        Ok(())
    }

    /// Whether the back/next button should be enabled
    pub fn can_advance(&self, direction: WizardDirection) -> bool {
        transition(self.step, direction, &self.session) != Transition::Reject
    }

    /// Move one step back or forward
    ///
    /// A transition whose required input is missing is a no-op. Entering the
    /// execution step runs the import right away; afterwards the wizard is on
    /// `Finished` if every job completed, or back on the step the import was
    /// started from so the user can retry.
    pub async fn advance(&mut self, direction: WizardDirection) -> ImportServiceResult<WizardStep> {
        match transition(self.step, direction, &self.session) {
            Transition::Reject => {
                debug!("Rejected {:?} from {:?}", direction, self.step);
            }
            Transition::MoveTo(next) => {
                if self.step == WizardStep::ChooseRepositoryType {
                    // Source availability depends on the type just chosen
                    self.session.clear_source();
                }
                debug!("Wizard step {:?} -> {:?}", self.step, next);
                self.step = next;
            }
            Transition::Execute => self.execute().await?,
        }
        Ok(self.step)
    }

    async fn execute(&mut self) -> ImportServiceResult<()> {
        let job = self.session.current_job()?;
        let origin = self.step;

        info!(
            "Importing {} repositories from {}",
            job.repository_type, job.source
        );
        self.step = WizardStep::Importing;

        let summary = self
            .dispatcher
            .dispatch(
                &mut self.session,
                vec![job],
                &mut self.presenter,
                self.notifier.as_ref(),
            )
            .await;

        self.step = if summary.is_complete() {
            WizardStep::Finished
        } else {
            origin
        };
        Ok(())
    }

    /// Close the finished wizard and hand back what was imported
    pub fn finish(self) -> ImportServiceResult<Vec<ImportedRepository>> {
        self.expect_step(WizardStep::Finished)?;
        Ok(self.session.into_results())
    }

    /// Discard the wizard and its session at any step
    pub fn close(self) {
        debug!("Import wizard closed on step {:?}", self.step);
    }

    fn expect_step(&self, expected: WizardStep) -> ImportServiceResult<()> {
        if self.step != expected {
            return Err(ImportError::InvalidStep(format!(
                "expected {:?}, wizard is on {:?}",
                expected, self.step
            ))
            .into());
        }
        Ok(())
    }
}
