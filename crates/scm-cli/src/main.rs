//! SCM admin CLI
//!
//! Imports repositories and manages the LDAP authentication settings of an
//! SCM server through its REST API.

mod commands;

use clap::{Parser, Subcommand};
use commands::{ImportCommand, LdapCommand};
use tracing_subscriber::{layer::SubscriberExt, Layer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "SCM_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: compact, full
    #[arg(
        long,
        default_value = "compact",
        env = "SCM_LOG_FORMAT",
        global = true
    )]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Repository import commands
    Import(ImportCommand),
    /// LDAP authentication settings
    Ldap(LdapCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // If RUST_LOG is set, use it directly; otherwise use our default filter
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::try_from_default_env()?
    } else {
        // All scm crates at the specified level, noisy dependencies at warn
        tracing_subscriber::EnvFilter::new(format!(
            "scm={level},\
             scm_cli={level},\
             scm_core={level},\
             scm_config={level},\
             scm_import={level},\
             scm_import_types={level},\
             h2=warn,\
             hyper=warn,\
             hyper_util=warn,\
             reqwest=warn,\
             rustls=warn",
            level = cli.log_level
        ))
    };

    let fmt_layer = match cli.log_format.as_str() {
        "full" => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
        _ => tracing_subscriber::fmt::layer() // "compact" or any other value
            .with_writer(std::io::stderr)
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Import(import_cmd) => import_cmd.execute(),
        Commands::Ldap(ldap_cmd) => ldap_cmd.execute(),
    }
}
