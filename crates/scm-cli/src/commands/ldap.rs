//! LDAP authentication settings
//!
//! Shows and updates `config/auth/ldap.json`. The connection password is
//! never printed.

use clap::{Args, Subcommand};
use colored::Colorize;
use scm_config::{LdapConfig, LdapConfigService};
use tracing::debug;

use super::{ConnectionArgs, OutputFormat};

#[derive(Args)]
pub struct LdapCommand {
    #[command(subcommand)]
    command: LdapCommands,
}

#[derive(Subcommand)]
enum LdapCommands {
    /// Show the current LDAP settings
    Show(ShowArgs),
    /// Change one or more LDAP settings
    Set(SetArgs),
}

#[derive(Args)]
struct ShowArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(long, value_enum, default_value = "text")]
    output_format: OutputFormat,
}

#[derive(Args)]
struct SetArgs {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Settings to change, e.g. `host-url=ldap://ldap.example.com:389 enabled=true`
    #[arg(value_name = "KEY=VALUE", required = true)]
    assignments: Vec<String>,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(long, value_enum, default_value = "text")]
    output_format: OutputFormat,
}

impl LdapCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            LdapCommands::Show(args) => args.execute(),
            LdapCommands::Set(args) => args.execute(),
        }
    }
}

fn print_config(config: &LdapConfig, format: OutputFormat) -> anyhow::Result<()> {
    let entries = config.display_entries();

    match format {
        OutputFormat::Json => {
            let output: serde_json::Map<String, serde_json::Value> = entries
                .into_iter()
                .map(|(key, value)| (key, serde_json::Value::String(value)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0) + 1;

            println!();
            let state = if config.enabled {
                "enabled".bright_green().bold()
            } else {
                "disabled".bright_yellow().bold()
            };
            println!("{} {}", "LDAP authentication is".bright_white(), state);
            println!();
            for (key, value) in entries {
                let shown = if value.is_empty() {
                    "-".dimmed()
                } else {
                    value.bright_cyan()
                };
                println!("  {:>width$} {}", format!("{}:", key), shown, width = width);
            }
            println!();
        }
    }

    Ok(())
}

impl ShowArgs {
    fn execute(self) -> anyhow::Result<()> {
        let service = LdapConfigService::new(self.connection.rest_client()?);
        let rt = tokio::runtime::Runtime::new()?;

        let config = rt.block_on(service.load())?;
        print_config(&config, self.output_format)
    }
}

impl SetArgs {
    fn execute(self) -> anyhow::Result<()> {
        debug!("Updating {} LDAP settings", self.assignments.len());

        let service = LdapConfigService::new(self.connection.rest_client()?);
        let rt = tokio::runtime::Runtime::new()?;

        let config = rt.block_on(service.update(&self.assignments))?;
        if self.output_format == OutputFormat::Text {
            println!("{}", "✓ LDAP settings saved".bright_green().bold());
        }
        print_config(&config, self.output_format)
    }
}
