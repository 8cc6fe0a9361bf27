//! Definition validation.
//!
//! Validates authoring invariants of command definitions before builders
//! are created against them: empty names, duplicate parameters or
//! subcommands in a scope, subcommand cycles, half-declared short forms,
//! stray delimiters, and synopsis sequences that put a required entry
//! after an optional one.
//!
//! # Examples
//!
//! ```
//! use command_invoke_core::*;
//!
//! let spec = CommandSpec::new("rsync")
//!     .with_parameter(ParameterSpec::flag("--archive"));
//! assert!(validate_spec(&spec).is_empty());
//!
//! // Required synopsis entry declared after an optional one.
//! let bad = CommandSpec::new("rsync")
//!     .with_synopsis(SynopsisSpec::optional("dest"))
//!     .with_synopsis(SynopsisSpec::required("source"));
//! let errors = validate_spec(&bad);
//! assert!(errors.iter().any(|e| matches!(e, ValidationError::SynopsisOrder { .. })));
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{CommandCatalog, CommandSpec, ParamStyle, ParameterSpec, SynopsisSpec};

/// Definition validation errors.
///
/// Each variant names a specific authoring problem; the `Display` impl
/// provides a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Catalog version string is empty.
    #[error("catalog version cannot be empty")]
    EmptyCatalogVersion,
    /// Two definitions in the same catalog share a command name.
    #[error("duplicate command in catalog: {0}")]
    DuplicateCommand(String),
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Parameter name is empty or whitespace-only.
    #[error("parameter name cannot be empty in scope {0}")]
    EmptyParameterName(String),
    /// Two parameters in the same scope share a name.
    #[error("duplicate parameter in scope {scope}: {parameter}")]
    DuplicateParameter {
        /// Scope (command path) containing the duplicates.
        scope: String,
        /// The repeated parameter name.
        parameter: String,
    },
    /// A short form declares only one of name and style.
    #[error("parameter {0} declares an incomplete short form")]
    IncompleteShortForm(String),
    /// Long and short styles disagree on value arity.
    #[error("parameter {0} short style disagrees with long style on arity")]
    ShortFormArityMismatch(String),
    /// A delimiter is declared on a parameter that never joins items.
    #[error("parameter {0} declares a delimiter but is not joined-style")]
    DelimiterWithoutJoin(String),
    /// Two subcommands in the same scope share a name.
    #[error("duplicate subcommand in scope: {0}")]
    DuplicateSubcommand(String),
    /// A subcommand path repeats a name, forming a cycle.
    #[error("subcommand cycle detected at path: {0}")]
    SubcommandCycle(String),
    /// Synopsis entry name is empty.
    #[error("synopsis name cannot be empty in scope {0}")]
    EmptySynopsisName(String),
    /// Two synopsis entries in the same scope share a name.
    #[error("duplicate synopsis entry in scope {scope}: {name}")]
    DuplicateSynopsis {
        /// Scope (command path) containing the duplicates.
        scope: String,
        /// The repeated synopsis name.
        name: String,
    },
    /// A required synopsis entry follows an optional one.
    #[error("required synopsis entry {name} follows an optional one in scope {scope}")]
    SynopsisOrder {
        /// Scope (command path) with the misordered sequence.
        scope: String,
        /// The misplaced required entry.
        name: String,
    },
}

/// Validates a catalog of definitions.
///
/// Checks the version string and command-name uniqueness, then validates
/// each definition. Stops at the first error found.
///
/// # Examples
///
/// ```
/// use command_invoke_core::*;
///
/// let mut catalog = CommandCatalog::new("1.0.0");
/// catalog.commands.push(CommandSpec::new("git"));
/// assert!(validate_catalog(&catalog).is_empty());
///
/// catalog.commands.push(CommandSpec::new("git"));
/// let errors = validate_catalog(&catalog);
/// assert!(errors.iter().any(|e| matches!(e, ValidationError::DuplicateCommand(_))));
/// ```
pub fn validate_catalog(catalog: &CommandCatalog) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if catalog.version.trim().is_empty() {
        errors.push(ValidationError::EmptyCatalogVersion);
        return errors;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for spec in &catalog.commands {
        if !seen.insert(spec.name.as_str()) {
            errors.push(ValidationError::DuplicateCommand(spec.name.clone()));
            return errors;
        }
        errors.extend(validate_spec(spec));
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

/// Validates a single command definition tree.
///
/// Stops at the first error found. An empty result means every builder
/// created against this definition can rely on the authoring invariants
/// the renderer assumes.
pub fn validate_spec(spec: &CommandSpec) -> Vec<ValidationError> {
    if spec.name.trim().is_empty() {
        return vec![ValidationError::EmptyCommandName];
    }
    let mut path = vec![spec.name.clone()];
    validate_scope(spec, &mut path)
}

fn validate_scope(spec: &CommandSpec, path: &mut Vec<String>) -> Vec<ValidationError> {
    let scope = path.join(" ");
    let mut errors = validate_parameters(&spec.parameters, &scope);
    if !errors.is_empty() {
        return errors;
    }

    errors.extend(validate_synopsis(&spec.synopsis, &scope));
    if !errors.is_empty() {
        return errors;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for sub in &spec.subcommands {
        let name = sub.name.trim();
        if name.is_empty() {
            errors.push(ValidationError::EmptyCommandName);
            return errors;
        }

        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateSubcommand(name.to_string()));
            return errors;
        }

        if path.iter().any(|segment| segment == name) {
            let cycle_path = path
                .iter()
                .cloned()
                .chain(std::iter::once(name.to_string()))
                .collect::<Vec<_>>()
                .join(" ");
            errors.push(ValidationError::SubcommandCycle(cycle_path));
            return errors;
        }

        path.push(name.to_string());
        errors.extend(validate_scope(sub, path));
        path.pop();
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

fn validate_parameters(parameters: &[ParameterSpec], scope: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for parameter in parameters {
        if parameter.name.trim().is_empty() {
            errors.push(ValidationError::EmptyParameterName(scope.to_string()));
            return errors;
        }

        if !seen.insert(parameter.name.as_str()) {
            errors.push(ValidationError::DuplicateParameter {
                scope: scope.to_string(),
                parameter: parameter.name.clone(),
            });
            return errors;
        }

        if parameter.short_name.is_some() != parameter.short_style.is_some() {
            errors.push(ValidationError::IncompleteShortForm(parameter.name.clone()));
            return errors;
        }

        if let Some(short_style) = parameter.short_style {
            if short_style.takes_value() != parameter.style.takes_value() {
                errors.push(ValidationError::ShortFormArityMismatch(
                    parameter.name.clone(),
                ));
                return errors;
            }
        }

        if parameter.delimiter.is_some()
            && parameter.style != ParamStyle::Joined
            && parameter.short_style != Some(ParamStyle::Joined)
        {
            errors.push(ValidationError::DelimiterWithoutJoin(parameter.name.clone()));
            return errors;
        }
    }

    errors
}

fn validate_synopsis(synopsis: &[SynopsisSpec], scope: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut optional_seen = false;

    for entry in synopsis {
        if entry.name.trim().is_empty() {
            errors.push(ValidationError::EmptySynopsisName(scope.to_string()));
            return errors;
        }

        if !seen.insert(entry.name.as_str()) {
            errors.push(ValidationError::DuplicateSynopsis {
                scope: scope.to_string(),
                name: entry.name.clone(),
            });
            return errors;
        }

        if entry.required && optional_seen {
            errors.push(ValidationError::SynopsisOrder {
                scope: scope.to_string(),
                name: entry.name.clone(),
            });
            return errors;
        }
        if !entry.required {
            optional_seen = true;
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use crate::CommandCatalog;

    use super::*;

    #[test]
    fn test_valid_definition_passes() {
        let spec = CommandSpec::new("restic")
            .with_parameter(ParameterSpec::flag("--verbose").with_short("-v", ParamStyle::Flag))
            .with_subcommand(
                CommandSpec::new("backup")
                    .with_parameter(ParameterSpec::separate("--tag"))
                    .with_synopsis(SynopsisSpec::required("path"))
                    .with_synopsis(SynopsisSpec::optional("extra")),
            );
        assert!(validate_spec(&spec).is_empty());
    }

    #[test]
    fn test_rejects_empty_command_name() {
        let errors = validate_spec(&CommandSpec::new("  "));
        assert_eq!(errors, vec![ValidationError::EmptyCommandName]);
    }

    #[test]
    fn test_rejects_duplicate_parameter() {
        let spec = CommandSpec::new("tool")
            .with_parameter(ParameterSpec::flag("--force"))
            .with_parameter(ParameterSpec::single_valued("--force"));
        let errors = validate_spec(&spec);
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateParameter {
                scope: "tool".to_string(),
                parameter: "--force".to_string(),
            }]
        );
    }

    #[test]
    fn test_rejects_incomplete_short_form() {
        let mut parameter = ParameterSpec::flag("--verbose");
        parameter.short_name = Some("-v".to_string());
        let spec = CommandSpec::new("tool").with_parameter(parameter);
        let errors = validate_spec(&spec);
        assert_eq!(
            errors,
            vec![ValidationError::IncompleteShortForm("--verbose".to_string())]
        );
    }

    #[test]
    fn test_rejects_short_form_arity_disagreement() {
        let spec = CommandSpec::new("tool").with_parameter(
            ParameterSpec::single_valued("--output").with_short("-o", ParamStyle::Flag),
        );
        let errors = validate_spec(&spec);
        assert_eq!(
            errors,
            vec![ValidationError::ShortFormArityMismatch("--output".to_string())]
        );
    }

    #[test]
    fn test_rejects_delimiter_on_non_joined_parameter() {
        let spec = CommandSpec::new("tool")
            .with_parameter(ParameterSpec::separate("--tag").with_delimiter(","));
        let errors = validate_spec(&spec);
        assert_eq!(
            errors,
            vec![ValidationError::DelimiterWithoutJoin("--tag".to_string())]
        );
    }

    #[test]
    fn test_accepts_delimiter_on_joined_short_form() {
        let spec = CommandSpec::new("tool").with_parameter(
            ParameterSpec::separate("--tag")
                .with_short("-t", ParamStyle::Joined)
                .with_delimiter(";"),
        );
        assert!(validate_spec(&spec).is_empty());
    }

    #[test]
    fn test_rejects_subcommand_cycle() {
        let spec = CommandSpec::new("git").with_subcommand(
            CommandSpec::new("remote").with_subcommand(CommandSpec::new("git")),
        );
        let errors = validate_spec(&spec);
        assert_eq!(
            errors,
            vec![ValidationError::SubcommandCycle("git remote git".to_string())]
        );
    }

    #[test]
    fn test_rejects_required_synopsis_after_optional() {
        let spec = CommandSpec::new("cp")
            .with_synopsis(SynopsisSpec::optional("flags"))
            .with_synopsis(SynopsisSpec::required("source"));
        let errors = validate_spec(&spec);
        assert_eq!(
            errors,
            vec![ValidationError::SynopsisOrder {
                scope: "cp".to_string(),
                name: "source".to_string(),
            }]
        );
    }

    #[test]
    fn test_rejects_duplicate_synopsis_entry() {
        let spec = CommandSpec::new("cp")
            .with_synopsis(SynopsisSpec::required("source"))
            .with_synopsis(SynopsisSpec::required("source"));
        let errors = validate_spec(&spec);
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::DuplicateSynopsis { .. }]
        ));
    }

    #[test]
    fn test_catalog_rejects_duplicate_commands() {
        let mut catalog = CommandCatalog::new("1.0.0");
        catalog.commands.push(CommandSpec::new("git"));
        catalog.commands.push(CommandSpec::new("git"));
        let errors = validate_catalog(&catalog);
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateCommand("git".to_string())]
        );
    }

    #[test]
    fn test_catalog_rejects_empty_version() {
        let catalog = CommandCatalog::new("  ");
        let errors = validate_catalog(&catalog);
        assert_eq!(errors, vec![ValidationError::EmptyCatalogVersion]);
    }
}
