//! Definition types for external command invocation grammars.
//!
//! This module defines the declarative model of an external tool's
//! invocation surface: named parameters with rendering styles, nested
//! subcommands, and ordered synopsis (positional) arguments. Definitions
//! are authored once, shared read-only across builders, and round-trip
//! through JSON and YAML via [`serde`].

use serde::{Deserialize, Serialize};

use crate::ParamStyle;

/// Delimiter used by [`ParamStyle::Joined`] when a parameter does not
/// declare its own.
pub const DEFAULT_JOIN_DELIMITER: &str = ",";

/// Definition of a single named parameter.
///
/// A parameter has a long name and style, and may additionally declare a
/// short form (alternate name and style) that is substituted only when
/// short-form rendering is requested at build time.
///
/// # Examples
///
/// ```
/// use command_invoke_core::{ParamStyle, ParameterSpec};
///
/// let exclude = ParameterSpec::joined("--exclude")
///     .with_short("-x", ParamStyle::Separate)
///     .with_delimiter(";");
///
/// assert_eq!(exclude.style, ParamStyle::Joined);
/// assert!(exclude.has_short_form());
/// assert_eq!(exclude.join_delimiter(), ";");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Long-form name; the key the builder resolves against.
    pub name: String,
    /// Rendering style for the long form.
    pub style: ParamStyle,
    /// Alternate name used when short-form rendering is requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    /// Style paired with [`short_name`](Self::short_name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_style: Option<ParamStyle>,
    /// Item delimiter for [`ParamStyle::Joined`]; defaults to
    /// [`DEFAULT_JOIN_DELIMITER`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterSpec {
    /// Creates a parameter with an explicit style.
    pub fn new(name: &str, style: ParamStyle) -> Self {
        Self {
            name: name.to_string(),
            style,
            short_name: None,
            short_style: None,
            delimiter: None,
            description: None,
        }
    }

    /// Creates a bare flag parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_invoke_core::{ParamStyle, ParameterSpec};
    ///
    /// let verbose = ParameterSpec::flag("--verbose");
    /// assert_eq!(verbose.style, ParamStyle::Flag);
    /// ```
    pub fn flag(name: &str) -> Self {
        Self::new(name, ParamStyle::Flag)
    }

    /// Creates a parameter rendered as `name value` (two tokens).
    pub fn single_valued(name: &str) -> Self {
        Self::new(name, ParamStyle::SingleValued)
    }

    /// Creates a parameter rendered as a single `name=value` token.
    pub fn equals_valued(name: &str) -> Self {
        Self::new(name, ParamStyle::EqualsValued)
    }

    /// Creates a list parameter whose name precedes every item.
    pub fn positional(name: &str) -> Self {
        Self::new(name, ParamStyle::Positional)
    }

    /// Creates a list parameter rendered as repeated name/value pairs.
    pub fn separate(name: &str) -> Self {
        Self::new(name, ParamStyle::Separate)
    }

    /// Creates a list parameter whose items are joined into one token.
    pub fn joined(name: &str) -> Self {
        Self::new(name, ParamStyle::Joined)
    }

    /// Declares a short form (alternate name and style).
    pub fn with_short(mut self, short_name: &str, short_style: ParamStyle) -> Self {
        self.short_name = Some(short_name.to_string());
        self.short_style = Some(short_style);
        self
    }

    /// Sets the item delimiter used by [`ParamStyle::Joined`].
    pub fn with_delimiter(mut self, delimiter: &str) -> Self {
        self.delimiter = Some(delimiter.to_string());
        self
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Whether a complete short form (name and style) is declared.
    pub fn has_short_form(&self) -> bool {
        self.short_name.is_some() && self.short_style.is_some()
    }

    /// The delimiter for joined-list rendering.
    pub fn join_delimiter(&self) -> &str {
        self.delimiter.as_deref().unwrap_or(DEFAULT_JOIN_DELIMITER)
    }
}

/// One entry in a command's ordered synopsis sequence.
///
/// Synopsis parameters are positional values appended after all named
/// parameters and subcommand tokens. Required entries must be declared
/// before optional ones; [`validate_spec`](crate::validate_spec) flags
/// definitions that break the ordering.
///
/// # Examples
///
/// ```
/// use command_invoke_core::SynopsisSpec;
///
/// let repo = SynopsisSpec::required("repository");
/// let paths = SynopsisSpec::optional("paths");
/// assert!(repo.required);
/// assert!(!paths.required);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynopsisSpec {
    /// Name under which a value is supplied at build time.
    pub name: String,
    /// Whether a value must be supplied.
    pub required: bool,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SynopsisSpec {
    /// Creates a required synopsis parameter.
    pub fn required(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: true,
            description: None,
        }
    }

    /// Creates an optional synopsis parameter.
    pub fn optional(name: &str) -> Self {
        Self {
            name: name.to_string(),
            required: false,
            description: None,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Declarative definition of a command's invocation grammar.
///
/// A definition is a tree: each node carries its parameter table, its
/// subcommand table (recursive, arbitrary depth), and its ordered synopsis
/// sequence. Definitions are immutable once authored and are shared
/// read-only by every [`CommandBuilder`](crate::CommandBuilder) created
/// against them.
///
/// # Examples
///
/// ```
/// use command_invoke_core::{CommandSpec, ParameterSpec, SynopsisSpec};
///
/// let spec = CommandSpec::new("restic")
///     .with_parameter(ParameterSpec::flag("--verbose"))
///     .with_subcommand(
///         CommandSpec::new("backup")
///             .with_parameter(ParameterSpec::separate("--tag"))
///             .with_synopsis(SynopsisSpec::required("path")),
///     );
///
/// assert!(spec.find_parameter("--verbose").is_some());
/// let backup = spec.find_subcommand("backup").unwrap();
/// assert!(backup.find_parameter("--tag").is_some());
/// assert!(backup.find_parameter("--verbose").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Command name; the first token of every rendered vector.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Named parameters accepted at this scope.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterSpec>,
    /// Nested subcommand definitions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<CommandSpec>,
    /// Ordered synopsis sequence, required entries first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synopsis: Vec<SynopsisSpec>,
}

impl CommandSpec {
    /// Creates an empty definition with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Adds a parameter to this scope.
    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Adds a nested subcommand definition.
    pub fn with_subcommand(mut self, subcommand: CommandSpec) -> Self {
        self.subcommands.push(subcommand);
        self
    }

    /// Appends an entry to the synopsis sequence.
    pub fn with_synopsis(mut self, entry: SynopsisSpec) -> Self {
        self.synopsis.push(entry);
        self
    }

    /// Looks up a parameter of this scope by long name.
    ///
    /// Subcommand scopes are not searched; resolution is strictly against
    /// the scope the builder currently points at.
    pub fn find_parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Looks up a direct subcommand by name.
    pub fn find_subcommand(&self, name: &str) -> Option<&CommandSpec> {
        self.subcommands.iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_constructors_set_style() {
        assert_eq!(ParameterSpec::flag("-v").style, ParamStyle::Flag);
        assert_eq!(
            ParameterSpec::single_valued("-o").style,
            ParamStyle::SingleValued
        );
        assert_eq!(
            ParameterSpec::equals_valued("--output").style,
            ParamStyle::EqualsValued
        );
        assert_eq!(ParameterSpec::joined("--tags").style, ParamStyle::Joined);
    }

    #[test]
    fn test_short_form_requires_both_fields() {
        let long_only = ParameterSpec::flag("--verbose");
        assert!(!long_only.has_short_form());

        let with_short = ParameterSpec::flag("--verbose").with_short("-v", ParamStyle::Flag);
        assert!(with_short.has_short_form());
    }

    #[test]
    fn test_join_delimiter_defaults_to_comma() {
        let spec = ParameterSpec::joined("--exclude");
        assert_eq!(spec.join_delimiter(), ",");
        let custom = ParameterSpec::joined("--exclude").with_delimiter(":");
        assert_eq!(custom.join_delimiter(), ":");
    }

    #[test]
    fn test_find_parameter_is_scope_local() {
        let spec = CommandSpec::new("tool")
            .with_parameter(ParameterSpec::flag("--global"))
            .with_subcommand(CommandSpec::new("sub").with_parameter(ParameterSpec::flag("--local")));

        assert!(spec.find_parameter("--global").is_some());
        assert!(spec.find_parameter("--local").is_none());
        let sub = spec.find_subcommand("sub").unwrap();
        assert!(sub.find_parameter("--local").is_some());
        assert!(sub.find_parameter("--global").is_none());
    }

    #[test]
    fn test_find_subcommand_supports_nesting() {
        let spec = CommandSpec::new("git")
            .with_subcommand(CommandSpec::new("remote").with_subcommand(CommandSpec::new("add")));

        let remote = spec.find_subcommand("remote").unwrap();
        assert!(remote.find_subcommand("add").is_some());
        assert!(spec.find_subcommand("add").is_none());
    }

    #[test]
    fn test_spec_json_round_trip() {
        let spec = CommandSpec::new("restic")
            .with_parameter(
                ParameterSpec::joined("--exclude")
                    .with_short("-e", ParamStyle::Separate)
                    .with_delimiter(";"),
            )
            .with_synopsis(SynopsisSpec::required("repository"))
            .with_synopsis(SynopsisSpec::optional("paths"));

        let json = serde_json::to_string(&spec).unwrap();
        let back: CommandSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
