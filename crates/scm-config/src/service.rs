use scm_core::{RestClient, RestError};
use thiserror::Error;
use tracing::{debug, info};

use crate::ldap::LdapConfig;

const LDAP_CONFIG_PATH: &str = "config/auth/ldap.json";

#[derive(Error, Debug)]
pub enum ConfigServiceError {
    #[error("Request error: {0}")]
    Rest(#[from] RestError),

    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Invalid value for {key}: {details}")]
    InvalidValue { key: String, details: String },

    #[error("Invalid assignment: {0} (expected key=value)")]
    InvalidAssignment(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ConfigServiceResult<T> = Result<T, ConfigServiceError>;

/// Loads and saves the LDAP authentication configuration
#[derive(Debug, Clone)]
pub struct LdapConfigService {
    client: RestClient,
}

impl LdapConfigService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    pub async fn load(&self) -> ConfigServiceResult<LdapConfig> {
        debug!("Loading LDAP configuration");
        Ok(self.client.get_json(LDAP_CONFIG_PATH).await?)
    }

    pub async fn save(&self, config: &LdapConfig) -> ConfigServiceResult<()> {
        self.client
            .post_json_no_content(LDAP_CONFIG_PATH, config)
            .await?;
        info!("Saved LDAP configuration");
        Ok(())
    }

    /// Load, apply `key=value` assignments, save
    ///
    /// Nothing is sent when any assignment is invalid.
    pub async fn update<S: AsRef<str>>(&self, assignments: &[S]) -> ConfigServiceResult<LdapConfig> {
        let parsed = assignments
            .iter()
            .map(|a| parse_assignment(a.as_ref()))
            .collect::<ConfigServiceResult<Vec<_>>>()?;

        let mut config = self.load().await?;
        for (key, value) in parsed {
            config.set(key, value)?;
        }

        self.save(&config).await?;
        Ok(config)
    }
}

/// Split `key=value`; the value may itself contain `=`
pub fn parse_assignment(assignment: &str) -> ConfigServiceResult<(&str, &str)> {
    match assignment.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(ConfigServiceError::InvalidAssignment(assignment.to_string())),
    }
}
