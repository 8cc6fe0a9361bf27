//! Ordered accumulation of parameter assignments against a definition.
//!
//! A [`CommandBuilder`] is created fresh per external-tool invocation and
//! bound to one shared, read-only [`CommandSpec`]. Calls to
//! [`param`](CommandBuilder::param) / [`param_value`](CommandBuilder::param_value)
//! and [`command`](CommandBuilder::command) record assignments in call
//! order; [`build`](CommandBuilder::build) renders them into the final
//! token vector without mutating the builder.
//!
//! # Examples
//!
//! ```
//! use command_invoke_core::{BuildOptions, CommandBuilder, CommandSpec, ParameterSpec};
//!
//! let spec = CommandSpec::new("restic")
//!     .with_parameter(ParameterSpec::flag("--verbose"))
//!     .with_subcommand(
//!         CommandSpec::new("backup").with_parameter(ParameterSpec::separate("--tag")),
//!     );
//!
//! let mut builder = CommandBuilder::new(&spec);
//! builder.param("--verbose")?;
//! builder.command("backup")?;
//! builder.param_value("--tag", vec!["nightly".to_string(), "full".to_string()])?;
//!
//! let tokens = builder.build(&BuildOptions::new())?;
//! assert_eq!(
//!     tokens,
//!     ["restic", "--verbose", "backup", "--tag", "nightly", "--tag", "full"]
//! );
//! # Ok::<(), command_invoke_core::BuildError>(())
//! ```

use std::collections::HashMap;

use thiserror::Error;

use crate::render;
use crate::{CommandSpec, ParamStyle, ParameterSpec};

/// Errors raised while recording assignments or rendering tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// `param()` was given a name absent from the current scope.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),
    /// `command()` was given a name absent from the current scope.
    #[error("unknown subcommand: {0}")]
    UnknownSubcommand(String),
    /// The supplied value shape does not fit the parameter's style.
    #[error("arity mismatch for parameter {parameter}: {style} style cannot take {given}")]
    ArityMismatch {
        /// Parameter whose assignment was rejected.
        parameter: String,
        /// Style the value was checked against.
        style: ParamStyle,
        /// Shape of the offending value.
        given: &'static str,
    },
    /// A required synopsis parameter had no supplied value at render time.
    #[error("missing required synopsis parameter: {0}")]
    MissingSynopsisValue(String),
}

/// Value attached to one parameter assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// No value; only valid for [`ParamStyle::Flag`].
    None,
    /// A single value.
    Scalar(String),
    /// An ordered list of values.
    List(Vec<String>),
}

impl ParamValue {
    /// The value shape name used in arity diagnostics.
    pub(crate) fn shape(&self) -> &'static str {
        match self {
            ParamValue::None => "no value",
            ParamValue::Scalar(_) => "a scalar",
            ParamValue::List(_) => "a list",
        }
    }

    /// The items of a list-capable assignment, a scalar counting as a
    /// one-element list.
    pub(crate) fn items(&self) -> Vec<&str> {
        match self {
            ParamValue::None => Vec::new(),
            ParamValue::Scalar(v) => vec![v.as_str()],
            ParamValue::List(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// The scalar value, if this assignment carries exactly one.
    pub(crate) fn as_scalar(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::List(items)
    }
}

impl From<&[&str]> for ParamValue {
    fn from(items: &[&str]) -> Self {
        ParamValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ParamValue {
    fn from(items: [&str; N]) -> Self {
        ParamValue::List(items.iter().map(|s| s.to_string()).collect())
    }
}

/// One entry in the builder's ordered assignment sequence.
#[derive(Debug, Clone)]
pub(crate) enum Assignment {
    /// A parameter assignment recorded by `param`/`param_value`.
    Param { name: String, value: ParamValue },
    /// A subcommand selection recorded by `command`.
    Subcommand { name: String },
}

/// Render-time options for [`CommandBuilder::build`].
///
/// # Examples
///
/// ```
/// use command_invoke_core::BuildOptions;
///
/// let options = BuildOptions::new()
///     .with_synopsis_value("repository", "/srv/backups")
///     .use_short_form();
/// assert!(options.short_form);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Values for synopsis parameters, keyed by synopsis name.
    pub synopsis_values: HashMap<String, String>,
    /// Substitute short forms for parameters that declare them.
    pub short_form: bool,
}

impl BuildOptions {
    /// Creates options with no synopsis values and long-form rendering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies a value for a synopsis parameter.
    pub fn with_synopsis_value(mut self, name: &str, value: &str) -> Self {
        self.synopsis_values
            .insert(name.to_string(), value.to_string());
        self
    }

    /// Requests short-form rendering.
    pub fn use_short_form(mut self) -> Self {
        self.short_form = true;
        self
    }
}

/// Mutable accumulator for one invocation of an external tool.
///
/// Lifecycle: `Empty → Accumulating` via `param`/`command`, back to `Empty`
/// via [`clear`](Self::clear). [`build`](Self::build) is a read-only
/// observation and may be called at any point, repeatedly.
///
/// A builder is single-invocation state and must not be shared across
/// concurrent invocations; the bound [`CommandSpec`] may be.
#[derive(Debug, Clone)]
pub struct CommandBuilder<'a> {
    spec: &'a CommandSpec,
    assignments: Vec<Assignment>,
    scope: Vec<&'a CommandSpec>,
}

impl<'a> CommandBuilder<'a> {
    /// Creates an empty builder bound to a definition.
    pub fn new(spec: &'a CommandSpec) -> Self {
        Self {
            spec,
            assignments: Vec::new(),
            scope: Vec::new(),
        }
    }

    /// The definition scope subsequent `param`/`command` calls resolve
    /// against: the most recently selected subcommand, or the root.
    pub fn current_scope(&self) -> &'a CommandSpec {
        self.scope.last().copied().unwrap_or(self.spec)
    }

    /// Records a valueless (flag) parameter assignment.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownParameter`] if the name is absent from the
    /// current scope; [`BuildError::ArityMismatch`] if the parameter's
    /// style expects a value.
    pub fn param(&mut self, name: &str) -> Result<&mut Self, BuildError> {
        self.param_value(name, ParamValue::None)
    }

    /// Records a parameter assignment with a scalar or list value.
    ///
    /// The assignment's position in the emission order is the position of
    /// this call. Nothing is recorded when an error is returned.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownParameter`] if the name is absent from the
    /// current scope; [`BuildError::ArityMismatch`] if the value shape does
    /// not fit the parameter's style.
    pub fn param_value(
        &mut self,
        name: &str,
        value: impl Into<ParamValue>,
    ) -> Result<&mut Self, BuildError> {
        let value = value.into();
        let parameter = render::resolve_parameter(self.current_scope(), name)?;
        check_arity(parameter, &value)?;
        self.assignments.push(Assignment::Param {
            name: name.to_string(),
            value,
        });
        Ok(self)
    }

    /// Selects a subcommand of the current scope.
    ///
    /// The selection is recorded in the assignment sequence, so its token
    /// position relative to surrounding parameters is preserved, and the
    /// subcommand's definition becomes the scope for subsequent calls.
    /// Nesting is unbounded.
    ///
    /// # Errors
    ///
    /// [`BuildError::UnknownSubcommand`] if the name is absent from the
    /// current scope's subcommand table; the scope is left unchanged.
    pub fn command(&mut self, name: &str) -> Result<&mut Self, BuildError> {
        let subcommand = self
            .current_scope()
            .find_subcommand(name)
            .ok_or_else(|| BuildError::UnknownSubcommand(name.to_string()))?;
        self.scope.push(subcommand);
        self.assignments.push(Assignment::Subcommand {
            name: name.to_string(),
        });
        Ok(self)
    }

    /// Renders the accumulated assignments into the final token vector.
    ///
    /// The builder is not mutated; calling `build` twice without
    /// intervening mutation yields identical vectors.
    ///
    /// # Errors
    ///
    /// [`BuildError::MissingSynopsisValue`] when a required synopsis
    /// parameter has no entry in `options.synopsis_values`. Any partially
    /// produced output is discarded.
    pub fn build(&self, options: &BuildOptions) -> Result<Vec<String>, BuildError> {
        render::render(self.spec, &self.assignments, options)
    }

    /// Discards all assignments and resets the scope to the root.
    ///
    /// The definition binding is retained, so the builder can be reused
    /// for another invocation of the same tool shape.
    pub fn clear(&mut self) {
        self.assignments.clear();
        self.scope.clear();
    }

    /// Whether any assignment has been recorded since creation or the
    /// last [`clear`](Self::clear).
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Checks a value shape against a parameter's declared style.
fn check_arity(parameter: &ParameterSpec, value: &ParamValue) -> Result<(), BuildError> {
    let fits = match parameter.style {
        ParamStyle::Flag => matches!(value, ParamValue::None),
        ParamStyle::SingleValued | ParamStyle::EqualsValued => {
            matches!(value, ParamValue::Scalar(_))
        }
        // List-capable styles accept a scalar as a one-element list.
        ParamStyle::Positional | ParamStyle::Separate | ParamStyle::Joined => {
            matches!(value, ParamValue::Scalar(_) | ParamValue::List(_))
        }
    };
    if fits {
        Ok(())
    } else {
        Err(BuildError::ArityMismatch {
            parameter: parameter.name.clone(),
            style: parameter.style,
            given: value.shape(),
        })
    }
}
