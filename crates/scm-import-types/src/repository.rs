//! Repository types as reported by the server

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::source::{ImportSourceKind, SourceOption};

/// Repository command a type may support
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    Pull,
    Push,
    Unbundle,
    Bundle,
    Incoming,
    Outgoing,
    /// Any command this client does not know about
    #[serde(other)]
    Unknown,
}

/// A repository type the server can import (git, svn, hg, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportableType {
    /// Unique key, used in import URLs
    pub name: String,
    /// Human-readable name
    pub display_name: String,
    #[serde(default)]
    pub supported_commands: BTreeSet<Command>,
}

impl ImportableType {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        supported_commands: impl IntoIterator<Item = Command>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            supported_commands: supported_commands.into_iter().collect(),
        }
    }

    pub fn supports(&self, command: Command) -> bool {
        self.supported_commands.contains(&command)
    }

    /// Whether this type can import from the given source
    pub fn supports_source(&self, kind: ImportSourceKind) -> bool {
        kind.required_command()
            .map_or(true, |command| self.supports(command))
    }

    /// All source kinds, each flagged with whether this type enables it
    pub fn source_options(&self) -> Vec<SourceOption> {
        ImportSourceKind::ALL
            .iter()
            .map(|&kind| SourceOption {
                kind,
                enabled: self.supports_source(kind),
            })
            .collect()
    }
}

/// A repository created by an import job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedRepository {
    #[serde(rename = "type")]
    pub repository_type: String,
    pub name: String,
}

impl ImportedRepository {
    pub fn new(repository_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            repository_type: repository_type.into(),
            name: name.into(),
        }
    }
}
