//! Definition bundling and file loading.
//!
//! A [`CommandCatalog`] groups multiple [`CommandSpec`] definitions with
//! version metadata, making a whole toolchain's invocation grammars
//! distributable as one JSON or YAML document. [`DefinitionDocument`]
//! loads either a catalog or a bare definition from disk, choosing the
//! format from the file extension (`.yaml`/`.yml` parse as YAML, anything
//! else as JSON).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CommandSpec;

/// Version of the catalog contract (semver).
pub const CATALOG_CONTRACT_VERSION: &str = "1.0.0";

/// Errors from catalog loading and command selection.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A requested command is not present in the catalog.
    #[error("unknown command in catalog: {0}")]
    UnknownCommand(String),

    /// The catalog holds several commands and none was named.
    #[error("catalog holds {0} commands; name one to select it")]
    CommandNotSelected(usize),
}

/// Serializable bundle of command definitions.
///
/// # Examples
///
/// ```
/// use command_invoke_core::{CommandCatalog, CommandSpec};
///
/// let mut catalog = CommandCatalog::new("1.0.0");
/// catalog.name = Some("backup-tools".into());
/// catalog.commands.push(CommandSpec::new("restic"));
/// catalog.commands.push(CommandSpec::new("borg"));
///
/// assert_eq!(catalog.command_count(), 2);
/// assert!(catalog.find("borg").is_some());
/// assert!(catalog.find("tar").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandCatalog {
    /// Catalog contract version (populated from
    /// [`CATALOG_CONTRACT_VERSION`]).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_version: Option<String>,
    /// Bundle version (semver string).
    pub version: String,
    /// Optional bundle name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional bundle description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Command definitions included in this bundle.
    pub commands: Vec<CommandSpec>,
}

impl CommandCatalog {
    /// Creates an empty catalog with the given bundle version.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            catalog_version: Some(CATALOG_CONTRACT_VERSION.to_string()),
            version: version.into(),
            name: None,
            description: None,
            commands: Vec::new(),
        }
    }

    /// Looks up a definition by command name.
    pub fn find(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|spec| spec.name == name)
    }

    /// Returns the number of definitions in this catalog.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }
}

/// A definition file's content: either a bare definition or a catalog.
///
/// # Examples
///
/// ```
/// use command_invoke_core::DefinitionDocument;
///
/// let doc: DefinitionDocument =
///     serde_json::from_str(r#"{ "name": "tar", "parameters": [] }"#).unwrap();
/// assert_eq!(doc.resolve(None).unwrap().name, "tar");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefinitionDocument {
    /// A versioned bundle of definitions.
    Catalog(CommandCatalog),
    /// A single bare definition.
    Spec(CommandSpec),
}

impl DefinitionDocument {
    /// Loads a definition document from a JSON or YAML file.
    ///
    /// # Errors
    ///
    /// [`CatalogError::Io`] on read failure, [`CatalogError::Json`] /
    /// [`CatalogError::Yaml`] on parse failure.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml") | Some("yml")
        );
        if is_yaml {
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(serde_json::from_str(&content)?)
        }
    }

    /// Selects the definition to build against.
    ///
    /// A bare definition resolves to itself (a non-matching `name` is an
    /// error). A catalog resolves by name; with no name it resolves only
    /// when it holds exactly one definition.
    ///
    /// # Errors
    ///
    /// [`CatalogError::UnknownCommand`] for a name miss,
    /// [`CatalogError::CommandNotSelected`] for an unnamed lookup in a
    /// multi-command catalog.
    pub fn resolve(&self, name: Option<&str>) -> Result<&CommandSpec, CatalogError> {
        match self {
            DefinitionDocument::Spec(spec) => match name {
                Some(requested) if requested != spec.name => {
                    Err(CatalogError::UnknownCommand(requested.to_string()))
                }
                _ => Ok(spec),
            },
            DefinitionDocument::Catalog(catalog) => match name {
                Some(requested) => catalog
                    .find(requested)
                    .ok_or_else(|| CatalogError::UnknownCommand(requested.to_string())),
                None => match catalog.commands.as_slice() {
                    [only] => Ok(only),
                    commands => Err(CatalogError::CommandNotSelected(commands.len())),
                },
            },
        }
    }
}
