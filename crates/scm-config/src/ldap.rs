//! LDAP authentication settings

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::service::{ConfigServiceError, ConfigServiceResult};

/// Setting names understood by [`LdapConfig::set`], in display order
pub const LDAP_SETTING_KEYS: [&str; 13] = [
    "attribute-name-fullname",
    "attribute-name-id",
    "attribute-name-mail",
    "attribute-name-group",
    "base-dn",
    "connection-dn",
    "connection-password",
    "host-url",
    "search-filter",
    "search-scope",
    "unit-groups",
    "unit-people",
    "enabled",
];

const PASSWORD_MASK: &str = "********";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    Object,
    One,
    Sub,
}

impl SearchScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchScope::Object => "object",
            SearchScope::One => "one",
            SearchScope::Sub => "sub",
        }
    }
}

impl FromStr for SearchScope {
    type Err = ConfigServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "object" => Ok(SearchScope::Object),
            "one" => Ok(SearchScope::One),
            "sub" => Ok(SearchScope::Sub),
            _ => Err(ConfigServiceError::InvalidValue {
                key: "search-scope".to_string(),
                details: format!("expected object, one or sub, got {}", s),
            }),
        }
    }
}

/// LDAP settings as stored under `config/auth/ldap.json`
///
/// Keys this client does not know are kept in `extra` and sent back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LdapConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_name_fullname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_name_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_name_mail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute_name_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_dn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_scope: Option<SearchScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_groups: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_people: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

fn text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_bool(key: &str, value: &str) -> ConfigServiceResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(ConfigServiceError::InvalidValue {
            key: key.to_string(),
            details: format!("expected a boolean, got {}", other),
        }),
    }
}

fn parse_number(key: &str, value: &str) -> ConfigServiceResult<Number> {
    let trimmed = value.trim();
    let number = if let Ok(n) = trimmed.parse::<i64>() {
        Some(Number::from(n))
    } else if let Ok(n) = trimmed.parse::<u64>() {
        Some(Number::from(n))
    } else {
        trimmed.parse::<f64>().ok().and_then(Number::from_f64)
    };

    number.ok_or_else(|| ConfigServiceError::InvalidValue {
        key: key.to_string(),
        details: format!("expected a number, got {}", trimmed),
    })
}

/// Typed value of a known setting; `None` clears it
fn known_value(key: &str, value: &str) -> ConfigServiceResult<Option<Value>> {
    match key {
        "enabled" => Ok(Some(Value::Bool(parse_bool(key, value)?))),
        "search-scope" => match text(value) {
            Some(scope) => Ok(Some(Value::from(scope.parse::<SearchScope>()?.as_str()))),
            None => Ok(None),
        },
        _ => Ok(text(value).map(Value::String)),
    }
}

/// Value for a setting the server reported but this client does not know,
/// in the JSON type the server used
fn extra_value(key: &str, current: &Value, value: &str) -> ConfigServiceResult<Value> {
    match current {
        Value::Bool(_) => Ok(Value::Bool(parse_bool(key, value)?)),
        Value::Number(_) => Ok(Value::Number(parse_number(key, value)?)),
        _ => Ok(Value::String(value.to_string())),
    }
}

impl LdapConfig {
    fn to_settings(&self) -> ConfigServiceResult<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(settings) => Ok(settings),
            _ => Ok(Map::new()),
        }
    }

    /// Assign one setting from its textual form
    ///
    /// Blank text clears string settings. Unknown keys may only be assigned
    /// when the server already reported them; their JSON type is kept.
    pub fn set(&mut self, key: &str, value: &str) -> ConfigServiceResult<()> {
        let mut settings = self.to_settings()?;

        let updated = if LDAP_SETTING_KEYS.contains(&key) {
            known_value(key, value)?
        } else {
            let current = settings
                .get(key)
                .ok_or_else(|| ConfigServiceError::UnknownSetting(key.to_string()))?;
            Some(extra_value(key, current, value)?)
        };

        match updated {
            Some(v) => settings.insert(key.to_string(), v),
            None => settings.remove(key),
        };

        *self = serde_json::from_value(Value::Object(settings))?;
        Ok(())
    }

    /// Settings as (key, display value) pairs, password masked
    ///
    /// Known settings come first in [`LDAP_SETTING_KEYS`] order, then the
    /// ones only the server knows.
    pub fn display_entries(&self) -> Vec<(String, String)> {
        let settings = self.to_settings().unwrap_or_default();

        let shown = |key: &str, value: Option<&Value>| match value {
            Some(_) if key == "connection-password" => PASSWORD_MASK.to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        let mut entries: Vec<(String, String)> = LDAP_SETTING_KEYS
            .iter()
            .map(|&key| (key.to_string(), shown(key, settings.get(key))))
            .collect();

        entries.extend(
            settings
                .iter()
                .filter(|(key, _)| !LDAP_SETTING_KEYS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), shown(key.as_str(), Some(value)))),
        );
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_server_document() {
        let json = r#"{
            "attribute-name-id": "uid",
            "base-dn": "dc=example,dc=com",
            "connection-password": "hunter2",
            "host-url": "ldap://ldap.example.com:389",
            "search-scope": "sub",
            "enabled": true,
            "referral": "follow"
        }"#;

        let config: LdapConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.attribute_name_id.as_deref(), Some("uid"));
        assert_eq!(config.search_scope, Some(SearchScope::Sub));
        assert!(config.enabled);
        assert_eq!(config.extra.get("referral"), Some(&Value::from("follow")));

        let round_trip = serde_json::to_value(&config).unwrap();
        assert_eq!(round_trip["referral"], "follow");
        assert_eq!(round_trip["base-dn"], "dc=example,dc=com");
    }

    #[test]
    fn test_set_known_settings() {
        let mut config = LdapConfig::default();

        config.set("host-url", "ldaps://ldap.example.com").unwrap();
        config.set("search-scope", "ONE").unwrap();
        config.set("enabled", "yes").unwrap();
        config.set("unit-people", "  ").unwrap();

        assert_eq!(config.host_url.as_deref(), Some("ldaps://ldap.example.com"));
        assert_eq!(config.search_scope, Some(SearchScope::One));
        assert!(config.enabled);
        assert_eq!(config.unit_people, None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = LdapConfig::default();

        assert!(matches!(
            config.set("search-scope", "tree"),
            Err(ConfigServiceError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("enabled", "maybe"),
            Err(ConfigServiceError::InvalidValue { .. })
        ));
        assert!(matches!(
            config.set("no-such-key", "x"),
            Err(ConfigServiceError::UnknownSetting(_))
        ));
    }

    #[test]
    fn test_set_keeps_type_of_extra_settings() {
        let mut config = LdapConfig::default();
        config.extra.insert("use-tls".to_string(), Value::Bool(false));

        config.set("use-tls", "true").unwrap();
        assert_eq!(config.extra["use-tls"], Value::Bool(true));
    }

    #[test]
    fn test_set_keeps_numbers_numeric() {
        let mut config: LdapConfig =
            serde_json::from_value(serde_json::json!({ "timeout": 30, "ratio": 0.5 })).unwrap();

        config.set("timeout", "60").unwrap();
        config.set("ratio", "0.75").unwrap();

        assert_eq!(config.extra["timeout"], serde_json::json!(60));
        assert_eq!(config.extra["ratio"], serde_json::json!(0.75));
        assert!(matches!(
            config.set("timeout", "soon"),
            Err(ConfigServiceError::InvalidValue { .. })
        ));
        assert_eq!(config.extra["timeout"], serde_json::json!(60));
    }

    #[test]
    fn test_every_listed_key_is_settable() {
        let mut config = LdapConfig::default();

        for key in LDAP_SETTING_KEYS {
            let value = match key {
                "enabled" => "true",
                "search-scope" => "sub",
                _ => "value",
            };
            config.set(key, value).unwrap();
        }

        let entries = config.display_entries();
        let keys: Vec<&str> = entries.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, LDAP_SETTING_KEYS.to_vec());
        assert!(entries.iter().all(|(_, value)| !value.is_empty()));
        assert!(config.extra.is_empty());
    }

    #[test]
    fn test_display_masks_password() {
        let mut config = LdapConfig::default();
        config.set("connection-password", "hunter2").unwrap();

        let entries = config.display_entries();
        let password = entries
            .iter()
            .find(|(key, _)| key == "connection-password")
            .map(|(_, value)| value.as_str());

        assert_eq!(password, Some("********"));
        assert_eq!(entries.len(), LDAP_SETTING_KEYS.len());
    }
}
