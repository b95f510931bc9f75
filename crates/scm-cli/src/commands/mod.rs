pub mod import;
pub mod ldap;

pub use import::ImportCommand;
pub use ldap::LdapCommand;

use clap::Args;
use scm_core::{ClientConfig, RestClient};
use std::time::Duration;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output with colors and formatting
    #[default]
    Text,
    /// JSON output for automation and scripting
    Json,
}

/// Where the SCM server lives and how to authenticate against it
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Base URL of the SCM REST API
    #[arg(
        long,
        env = "SCM_SERVER_URL",
        default_value = scm_core::config::DEFAULT_SERVER_URL
    )]
    pub server_url: String,

    /// API token sent as a bearer token
    #[arg(long, env = "SCM_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout", env = "SCM_REQUEST_TIMEOUT")]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.server_url.clone());
        if let Some(token) = &self.api_token {
            config = config.with_api_token(token.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_request_timeout(Duration::from_secs(secs));
        }
        config
    }

    pub fn rest_client(&self) -> anyhow::Result<RestClient> {
        Ok(RestClient::new(self.client_config())?)
    }
}
