//! Server configuration for the SCM admin tools
//!
//! Currently the LDAP authentication settings under `config/auth/ldap.json`.

mod ldap;
mod service;

pub use ldap::{LdapConfig, SearchScope, LDAP_SETTING_KEYS};
pub use service::{parse_assignment, ConfigServiceError, ConfigServiceResult, LdapConfigService};
