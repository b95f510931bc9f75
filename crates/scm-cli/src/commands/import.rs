//! Repository import commands
//!
//! `types` lists what the server can import, `run` imports every checked type
//! from the server's repository directory and `wizard` walks the import wizard
//! for one type and source.

use clap::{Args, Subcommand};
use colored::Colorize;
use scm_core::{Notification, Notifier, RestClient};
use scm_import::{
    ImportCoordinator, ImportSession, RepositoryListing, RestImportBackend, ResultPresenter,
    ResultView, WizardDirection, WizardStep,
};
use scm_import_types::{ImportError, ImportSourceKind, ImportableType, ImportedRepository};
use std::sync::Arc;
use tracing::{debug, warn};

use super::{ConnectionArgs, OutputFormat};

#[derive(Args)]
pub struct ImportCommand {
    #[command(subcommand)]
    command: ImportCommands,
}

#[derive(Subcommand)]
enum ImportCommands {
    /// List importable repository types and the sources each one enables
    Types(TypesArgs),
    /// Import every checked type from the server's repository directory
    Run(RunArgs),
    /// Import one type from one source, step by step
    Wizard(WizardArgs),
}

#[derive(Args)]
struct TypesArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(long, value_enum, default_value = "text")]
    output_format: OutputFormat,
}

#[derive(Args)]
struct RunArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Repository type to import (repeatable)
    #[arg(
        long = "type",
        value_name = "TYPE",
        required_unless_present = "all",
        conflicts_with = "all"
    )]
    types: Vec<String>,

    /// Import every type the server reports
    #[arg(long)]
    all: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(long, value_enum, default_value = "text")]
    output_format: OutputFormat,
}

#[derive(Args)]
struct WizardArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Repository type to import
    #[arg(long = "type", value_name = "TYPE")]
    repository_type: String,

    /// Where to import from: directory, url or file
    #[arg(long, default_value = "directory")]
    source: String,

    /// Name of the new repository (url and file sources)
    #[arg(long)]
    name: Option<String>,

    /// Remote repository URL (url source)
    #[arg(long)]
    url: Option<String>,

    /// Bundle file on the server (file source)
    #[arg(long)]
    file: Option<String>,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(long, value_enum, default_value = "text")]
    output_format: OutputFormat,
}

impl ImportCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            ImportCommands::Types(args) => args.execute(),
            ImportCommands::Run(args) => args.execute(),
            ImportCommands::Wizard(args) => args.execute(),
        }
    }
}

/// Prints the imported repositories once the whole batch has completed
struct TerminalView {
    format: OutputFormat,
}

impl ResultView for TerminalView {
    fn render(&mut self, repositories: &[ImportedRepository]) {
        match self.format {
            OutputFormat::Json => match serde_json::to_string_pretty(repositories) {
                Ok(json) => println!("{}", json),
                Err(e) => warn!("Failed to serialize import result: {}", e),
            },
            OutputFormat::Text => print_repositories(repositories),
        }
    }
}

/// The terminal has no repository list to reload; point the user at the change
struct ListingNotice {
    format: OutputFormat,
}

impl RepositoryListing for ListingNotice {
    fn refresh(&mut self) {
        debug!("Repository listing changed");
        if self.format == OutputFormat::Text {
            println!("{}", "Repository list updated on the server.".dimmed());
        }
    }
}

/// Writes notifications to stderr
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        eprintln!(
            "{} {}",
            format!("✗ {}:", notification.title).bright_red().bold(),
            notification.message
        );
    }
}

fn coordinator(client: RestClient) -> ImportCoordinator {
    ImportCoordinator::new(
        Arc::new(RestImportBackend::new(client)),
        Arc::new(ConsoleNotifier),
    )
}

fn presenter(format: OutputFormat) -> ResultPresenter {
    ResultPresenter::new(Box::new(TerminalView { format }))
        .with_listing(Box::new(ListingNotice { format }))
}

fn print_repositories(repositories: &[ImportedRepository]) {
    println!();
    if repositories.is_empty() {
        println!("{}", "No new repositories found.".bright_yellow());
        println!();
        return;
    }

    println!(
        "{}",
        format!("✓ Imported {} repositories", repositories.len())
            .bright_green()
            .bold()
    );
    println!();

    let width = repositories
        .iter()
        .map(|r| r.repository_type.len())
        .max()
        .unwrap_or(0)
        .max("TYPE".len());

    println!("  {:<width$}  {}", "TYPE".bold(), "NAME".bold(), width = width);
    for repository in repositories {
        println!(
            "  {:<width$}  {}",
            repository.repository_type,
            repository.name.bright_cyan(),
            width = width
        );
    }
    println!();
}

/// Resolve the requested type names against what the server reports
fn checked_types(
    available: &[ImportableType],
    requested: &[String],
) -> Result<Vec<ImportableType>, ImportError> {
    requested
        .iter()
        .map(|name| {
            available
                .iter()
                .find(|t| &t.name == name)
                .cloned()
                .ok_or_else(|| ImportError::UnknownRepositoryType(name.clone()))
        })
        .collect()
}

fn ensure_complete(session: &ImportSession) -> anyhow::Result<()> {
    if session.is_complete() {
        return Ok(());
    }
    anyhow::bail!(
        "Import did not complete: {} of {} jobs failed",
        session.failed_job_count(),
        session.dispatched_job_count()
    )
}

impl TypesArgs {
    fn execute(self) -> anyhow::Result<()> {
        let client = self.connection.rest_client()?;
        let rt = tokio::runtime::Runtime::new()?;
        let types = rt.block_on(coordinator(client).importable_types())?;

        match self.output_format {
            OutputFormat::Json => {
                let output: Vec<_> = types
                    .iter()
                    .map(|t| {
                        serde_json::json!({
                            "name": t.name,
                            "displayName": t.display_name,
                            "supportedCommands": t.supported_commands,
                            "sources": t.source_options(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if types.is_empty() {
                    println!("{}", "The server reports no importable types.".bright_yellow());
                    return Ok(());
                }

                let name_width = types.iter().map(|t| t.name.len()).max().unwrap_or(0).max(4);
                let display_width = types
                    .iter()
                    .map(|t| t.display_name.len())
                    .max()
                    .unwrap_or(0)
                    .max(12);

                println!();
                println!(
                    "  {:<nw$}  {:<dw$}  {}",
                    "NAME".bold(),
                    "DISPLAY NAME".bold(),
                    "SOURCES".bold(),
                    nw = name_width,
                    dw = display_width
                );
                for t in &types {
                    let sources = t
                        .source_options()
                        .iter()
                        .map(|option| {
                            if option.enabled {
                                option.kind.as_str().bright_green().to_string()
                            } else {
                                option.kind.as_str().dimmed().to_string()
                            }
                        })
                        .collect::<Vec<_>>()
                        .join(" ");
                    println!(
                        "  {:<nw$}  {:<dw$}  {}",
                        t.name,
                        t.display_name,
                        sources,
                        nw = name_width,
                        dw = display_width
                    );
                }
                println!();
            }
        }

        Ok(())
    }
}

impl RunArgs {
    fn execute(self) -> anyhow::Result<()> {
        let client = self.connection.rest_client()?;
        let rt = tokio::runtime::Runtime::new()?;

        let session = rt.block_on(async {
            let coordinator = coordinator(client);
            let available = coordinator.importable_types().await?;
            let checked = if self.all {
                available
            } else {
                checked_types(&available, &self.types)?
            };

            if checked.is_empty() {
                anyhow::bail!("The server reports no importable types");
            }

            let mut presenter = presenter(self.output_format);
            Ok::<_, anyhow::Error>(coordinator.import_checked(&checked, &mut presenter).await)
        })?;

        ensure_complete(&session)
    }
}

impl WizardArgs {
    /// Flags that belong to `source`; the others are ignored
    fn source_parameters(&self, source: ImportSourceKind) -> Vec<(&'static str, String)> {
        source
            .required_parameters()
            .iter()
            .filter_map(|&field| {
                let value = match field {
                    "name" => self.name.as_ref(),
                    "url" => self.url.as_ref(),
                    "file" => self.file.as_ref(),
                    _ => None,
                };
                value.map(|v| (field, v.clone()))
            })
            .collect()
    }

    fn execute(self) -> anyhow::Result<()> {
        let source: ImportSourceKind = self.source.parse()?;
        let client = self.connection.rest_client()?;
        let rt = tokio::runtime::Runtime::new()?;

        rt.block_on(async {
            let mut wizard = coordinator(client)
                .open_wizard(presenter(self.output_format))
                .await?;

            wizard.select_repository_type(&self.repository_type)?;
            wizard.advance(WizardDirection::Forward).await?;

            let enabled = wizard
                .source_options()
                .iter()
                .any(|option| option.kind == source && option.enabled);
            if !enabled {
                anyhow::bail!(ImportError::UnsupportedSource {
                    repository_type: self.repository_type.clone(),
                    source_kind: source.to_string(),
                });
            }

            wizard.select_import_source(source)?;
            let mut step = wizard.advance(WizardDirection::Forward).await?;

            if step == WizardStep::EnterSourceDetails {
                for (field, value) in self.source_parameters(source) {
                    wizard.set_source_parameter(field, value)?;
                }

                if let Some(field) = source.missing_parameter(wizard.session().source_parameters()) {
                    anyhow::bail!(ImportError::MissingParameter(field.to_string()));
                }
                step = wizard.advance(WizardDirection::Forward).await?;
            }

            if step != WizardStep::Finished {
                ensure_complete(wizard.session())?;
            }

            let imported = wizard.finish()?;
            debug!("Wizard imported {} repositories", imported.len());
            Ok::<(), anyhow::Error>(())
        })
    }
}
