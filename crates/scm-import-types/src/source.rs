//! Import sources and jobs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{ImportError, ImportResult};
use crate::repository::Command;

/// Field name -> value, as entered on the source details step
pub type SourceParameters = BTreeMap<String, String>;

/// Where repositories are imported from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportSourceKind {
    /// Repositories already present in the server's repository directory
    Directory,
    /// Pull from a remote repository URL
    Url,
    /// Unbundle an uploaded bundle file
    File,
}

impl ImportSourceKind {
    pub const ALL: [ImportSourceKind; 3] = [
        ImportSourceKind::Directory,
        ImportSourceKind::Url,
        ImportSourceKind::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportSourceKind::Directory => "directory",
            ImportSourceKind::Url => "url",
            ImportSourceKind::File => "file",
        }
    }

    /// Command the repository type must support for this source
    pub fn required_command(&self) -> Option<Command> {
        match self {
            ImportSourceKind::Directory => None,
            ImportSourceKind::Url => Some(Command::Pull),
            ImportSourceKind::File => Some(Command::Unbundle),
        }
    }

    /// Parameters that must be entered before the import can run
    pub fn required_parameters(&self) -> &'static [&'static str] {
        match self {
            ImportSourceKind::Directory => &[],
            ImportSourceKind::Url => &["name", "url"],
            ImportSourceKind::File => &["name", "file"],
        }
    }

    /// Directory imports go straight to execution
    pub fn needs_parameters(&self) -> bool {
        !self.required_parameters().is_empty()
    }

    /// First required parameter that is absent or blank
    pub fn missing_parameter(&self, parameters: &SourceParameters) -> Option<&'static str> {
        self.required_parameters().iter().copied().find(|field| {
            parameters
                .get(*field)
                .map_or(true, |value| value.trim().is_empty())
        })
    }
}

impl FromStr for ImportSourceKind {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "directory" => Ok(ImportSourceKind::Directory),
            "url" => Ok(ImportSourceKind::Url),
            "file" | "bundle" => Ok(ImportSourceKind::File),
            _ => Err(ImportError::UnknownSource(s.to_string())),
        }
    }
}

impl std::fmt::Display for ImportSourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A source kind as offered to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceOption {
    pub kind: ImportSourceKind,
    pub enabled: bool,
}

/// One request's worth of import work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportJob {
    pub repository_type: String,
    pub source: ImportSourceKind,
    #[serde(default)]
    pub parameters: SourceParameters,
}

impl ImportJob {
    /// Import everything found in the server's directory for a type
    pub fn directory(repository_type: impl Into<String>) -> Self {
        Self {
            repository_type: repository_type.into(),
            source: ImportSourceKind::Directory,
            parameters: SourceParameters::new(),
        }
    }

    pub fn new(
        repository_type: impl Into<String>,
        source: ImportSourceKind,
        parameters: SourceParameters,
    ) -> Self {
        Self {
            repository_type: repository_type.into(),
            source,
            parameters,
        }
    }

    /// Check that every parameter the source requires is present
    pub fn validate(&self) -> ImportResult<()> {
        match self.source.missing_parameter(&self.parameters) {
            Some(field) => Err(ImportError::MissingParameter(field.to_string())),
            None => Ok(()),
        }
    }
}
