//! Token emission for accumulated builder state.
//!
//! Rendering is a pure walk over the ordered assignment sequence: the root
//! command name first, then per-assignment tokens following each
//! parameter's style (substituting short forms on request), then the
//! synopsis values of the scope actually being invoked. The walk tracks
//! scope the same way the builder did, so parameter names recorded after a
//! subcommand marker resolve against that subcommand's definition.

use tracing::{debug, trace};

use crate::builder::{Assignment, BuildError, BuildOptions, ParamValue};
use crate::{CommandSpec, ParamStyle, ParameterSpec};

/// Resolves a parameter name against one definition scope.
///
/// Stateless on purpose: both the builder (at record time) and the
/// renderer (at emit time) use this same lookup, and it is unit-testable
/// without constructing an invocation.
pub(crate) fn resolve_parameter<'a>(
    scope: &'a CommandSpec,
    name: &str,
) -> Result<&'a ParameterSpec, BuildError> {
    scope
        .find_parameter(name)
        .ok_or_else(|| BuildError::UnknownParameter(name.to_string()))
}

/// Renders the final token vector for an assignment sequence.
pub(crate) fn render(
    root: &CommandSpec,
    assignments: &[Assignment],
    options: &BuildOptions,
) -> Result<Vec<String>, BuildError> {
    let mut tokens = vec![root.name.clone()];
    let mut scope = root;

    for assignment in assignments {
        match assignment {
            Assignment::Subcommand { name } => {
                scope = scope
                    .find_subcommand(name)
                    .ok_or_else(|| BuildError::UnknownSubcommand(name.clone()))?;
                tokens.push(scope.name.clone());
            }
            Assignment::Param { name, value } => {
                let parameter = resolve_parameter(scope, name)?;
                emit_parameter(&mut tokens, parameter, value, options.short_form)?;
            }
        }
    }

    append_synopsis(&mut tokens, scope, options)?;

    debug!(
        command = %root.name,
        scope = %scope.name,
        tokens = tokens.len(),
        "Rendered argument vector"
    );
    Ok(tokens)
}

/// Emits the tokens for one parameter assignment.
fn emit_parameter(
    tokens: &mut Vec<String>,
    parameter: &ParameterSpec,
    value: &ParamValue,
    short_form: bool,
) -> Result<(), BuildError> {
    // Short form applies only when requested and fully declared.
    let (name, style) = match (short_form, &parameter.short_name, parameter.short_style) {
        (true, Some(short), Some(style)) => (short.as_str(), style),
        _ => (parameter.name.as_str(), parameter.style),
    };
    trace!(parameter = name, style = %style, "Emitting parameter");

    match style {
        ParamStyle::Flag => tokens.push(name.to_string()),
        ParamStyle::SingleValued => {
            let scalar = scalar_value(parameter, style, value)?;
            tokens.push(name.to_string());
            tokens.push(scalar.to_string());
        }
        ParamStyle::EqualsValued => {
            let scalar = scalar_value(parameter, style, value)?;
            tokens.push(format!("{name}={scalar}"));
        }
        ParamStyle::Positional | ParamStyle::Separate => {
            for item in value.items() {
                tokens.push(name.to_string());
                tokens.push(item.to_string());
            }
        }
        ParamStyle::Joined => {
            // An empty list emits nothing, matching the other list styles;
            // a dangling empty-string token would change the invoked
            // tool's semantics.
            let items = value.items();
            if !items.is_empty() {
                tokens.push(name.to_string());
                tokens.push(items.join(parameter.join_delimiter()));
            }
        }
    }
    Ok(())
}

/// Extracts the scalar of a value, re-checking arity for the style in
/// effect (a short style may differ from the long one the builder checked).
fn scalar_value<'v>(
    parameter: &ParameterSpec,
    style: ParamStyle,
    value: &'v ParamValue,
) -> Result<&'v str, BuildError> {
    value.as_scalar().ok_or_else(|| BuildError::ArityMismatch {
        parameter: parameter.name.clone(),
        style,
        given: value.shape(),
    })
}

/// Appends synopsis values of the invoked scope, in declared order.
///
/// Fails fast on the first required entry without a supplied value;
/// optional entries without values are skipped.
fn append_synopsis(
    tokens: &mut Vec<String>,
    scope: &CommandSpec,
    options: &BuildOptions,
) -> Result<(), BuildError> {
    for entry in &scope.synopsis {
        match options.synopsis_values.get(&entry.name) {
            Some(value) => tokens.push(value.clone()),
            None if entry.required => {
                return Err(BuildError::MissingSynopsisValue(entry.name.clone()));
            }
            None => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::{BuildOptions, CommandBuilder, ParameterSpec, SynopsisSpec};

    use super::*;

    fn spec() -> CommandSpec {
        CommandSpec::new("borg")
            .with_parameter(ParameterSpec::flag("--progress").with_short("-p", ParamStyle::Flag))
            .with_parameter(
                ParameterSpec::single_valued("--compression")
                    .with_short("-C", ParamStyle::SingleValued),
            )
            .with_parameter(ParameterSpec::equals_valued("--umask"))
            .with_subcommand(
                CommandSpec::new("create")
                    .with_parameter(ParameterSpec::separate("--exclude"))
                    .with_parameter(
                        ParameterSpec::joined("--pattern").with_short("-P", ParamStyle::Separate),
                    )
                    .with_parameter(ParameterSpec::positional("--paths-from"))
                    .with_synopsis(SynopsisSpec::required("archive"))
                    .with_synopsis(SynopsisSpec::optional("path")),
            )
    }

    #[test]
    fn test_resolve_parameter_without_builder() {
        let spec = spec();
        assert!(resolve_parameter(&spec, "--progress").is_ok());
        let err = resolve_parameter(&spec, "--exclude").unwrap_err();
        assert_eq!(err, BuildError::UnknownParameter("--exclude".to_string()));
    }

    #[test]
    fn test_flag_emits_name_only() {
        let spec = spec();
        let mut builder = CommandBuilder::new(&spec);
        builder.param("--progress").unwrap();
        let tokens = builder.build(&BuildOptions::new()).unwrap();
        assert_eq!(tokens, ["borg", "--progress"]);
        assert_eq!(tokens.iter().filter(|t| *t == "--progress").count(), 1);
    }

    #[test]
    fn test_single_valued_emits_two_tokens_in_order() {
        let spec = spec();
        let mut builder = CommandBuilder::new(&spec);
        builder.param("--progress").unwrap();
        builder.param_value("--compression", "zstd,9").unwrap();
        let tokens = builder.build(&BuildOptions::new()).unwrap();
        assert_eq!(tokens, ["borg", "--progress", "--compression", "zstd,9"]);
    }

    #[test]
    fn test_equals_valued_emits_joined_token() {
        let spec = spec();
        let mut builder = CommandBuilder::new(&spec);
        builder.param_value("--umask", "0027").unwrap();
        let tokens = builder.build(&BuildOptions::new()).unwrap();
        assert_eq!(tokens, ["borg", "--umask=0027"]);
    }

    #[test]
    fn test_separate_list_repeats_name_value_pairs() {
        let spec = spec();
        let mut builder = CommandBuilder::new(&spec);
        builder.command("create").unwrap();
        builder
            .param_value("--exclude", ["*.tmp", "*.cache", "target"])
            .unwrap();
        let tokens = builder
            .build(&BuildOptions::new().with_synopsis_value("archive", "daily"))
            .unwrap();
        assert_eq!(
            tokens,
            [
                "borg", "create", "--exclude", "*.tmp", "--exclude", "*.cache", "--exclude",
                "target", "daily"
            ]
        );
    }

    #[test]
    fn test_positional_list_repeats_name_before_items() {
        let spec = spec();
        let mut builder = CommandBuilder::new(&spec);
        builder.command("create").unwrap();
        builder.param_value("--paths-from", ["a.txt", "b.txt"]).unwrap();
        let tokens = builder
            .build(&BuildOptions::new().with_synopsis_value("archive", "daily"))
            .unwrap();
        assert_eq!(
            tokens,
            ["borg", "create", "--paths-from", "a.txt", "--paths-from", "b.txt", "daily"]
        );
    }

    #[test]
    fn test_joined_list_concatenates_with_delimiter() {
        let spec = spec();
        let mut builder = CommandBuilder::new(&spec);
        builder.command("create").unwrap();
        builder.param_value("--pattern", ["x", "y"]).unwrap();
        let tokens = builder
            .build(&BuildOptions::new().with_synopsis_value("archive", "daily"))
            .unwrap();
        assert_eq!(tokens, ["borg", "create", "--pattern", "x,y", "daily"]);
    }

    #[test]
    fn test_joined_respects_custom_delimiter() {
        let custom = CommandSpec::new("tool")
            .with_parameter(ParameterSpec::joined("--fields").with_delimiter(":"));
        let mut builder = CommandBuilder::new(&custom);
        builder.param_value("--fields", ["a", "b", "c"]).unwrap();
        let tokens = builder.build(&BuildOptions::new()).unwrap();
        assert_eq!(tokens, ["tool", "--fields", "a:b:c"]);
    }

    #[test]
    fn test_empty_lists_emit_no_tokens() {
        let spec = CommandSpec::new("tool")
            .with_parameter(ParameterSpec::separate("--tag"))
            .with_parameter(ParameterSpec::positional("--paths-from"))
            .with_parameter(ParameterSpec::joined("--fields"));
        let mut builder = CommandBuilder::new(&spec);
        builder.param_value("--tag", Vec::<String>::new()).unwrap();
        builder
            .param_value("--paths-from", Vec::<String>::new())
            .unwrap();
        builder.param_value("--fields", Vec::<String>::new()).unwrap();

        let tokens = builder.build(&BuildOptions::new()).unwrap();
        assert_eq!(tokens, vec!["tool".to_string()]);
    }

    #[test]
    fn test_subcommand_keeps_surrounding_order() {
        let spec = spec();
        let mut builder = CommandBuilder::new(&spec);
        builder.param("--progress").unwrap();
        builder.command("create").unwrap();
        builder.param_value("--exclude", "*.log").unwrap();
        let tokens = builder
            .build(&BuildOptions::new().with_synopsis_value("archive", "daily"))
            .unwrap();
        assert_eq!(
            tokens,
            ["borg", "--progress", "create", "--exclude", "*.log", "daily"]
        );
    }

    #[test]
    fn test_nested_subcommands_render_in_sequence() {
        let spec = CommandSpec::new("git").with_subcommand(
            CommandSpec::new("remote").with_subcommand(
                CommandSpec::new("add")
                    .with_parameter(ParameterSpec::single_valued("--track")),
            ),
        );
        let mut builder = CommandBuilder::new(&spec);
        builder.command("remote").unwrap();
        builder.command("add").unwrap();
        builder.param_value("--track", "main").unwrap();
        let tokens = builder.build(&BuildOptions::new()).unwrap();
        assert_eq!(tokens, ["git", "remote", "add", "--track", "main"]);
    }

    #[test]
    fn test_missing_required_synopsis_value_fails() {
        let spec = spec();
        let mut builder = CommandBuilder::new(&spec);
        builder.command("create").unwrap();
        let err = builder.build(&BuildOptions::new()).unwrap_err();
        assert_eq!(err, BuildError::MissingSynopsisValue("archive".to_string()));
    }

    #[test]
    fn test_synopsis_values_append_after_parameters_in_order() {
        let spec = spec();
        let mut builder = CommandBuilder::new(&spec);
        builder.command("create").unwrap();
        builder.param_value("--exclude", "*.log").unwrap();
        let options = BuildOptions::new()
            .with_synopsis_value("archive", "daily")
            .with_synopsis_value("path", "/home");
        let tokens = builder.build(&options).unwrap();
        assert_eq!(
            tokens,
            ["borg", "create", "--exclude", "*.log", "daily", "/home"]
        );
    }

    #[test]
    fn test_optional_synopsis_value_is_skipped_when_absent() {
        let spec = spec();
        let mut builder = CommandBuilder::new(&spec);
        builder.command("create").unwrap();
        let tokens = builder
            .build(&BuildOptions::new().with_synopsis_value("archive", "daily"))
            .unwrap();
        assert_eq!(tokens, ["borg", "create", "daily"]);
    }

    #[test]
    fn test_short_form_substitutes_declared_parameters_only() {
        let spec = spec();
        let mut builder = CommandBuilder::new(&spec);
        builder.param("--progress").unwrap();
        builder.param_value("--compression", "lz4").unwrap();
        builder.param_value("--umask", "0027").unwrap();
        let tokens = builder.build(&BuildOptions::new().use_short_form()).unwrap();
        // --umask declares no short form and falls back to long rendering.
        assert_eq!(tokens, ["borg", "-p", "-C", "lz4", "--umask=0027"]);
    }

    #[test]
    fn test_short_form_may_change_list_style() {
        let spec = spec();
        let mut builder = CommandBuilder::new(&spec);
        builder.command("create").unwrap();
        builder.param_value("--pattern", ["x", "y"]).unwrap();
        let options = BuildOptions::new()
            .with_synopsis_value("archive", "daily")
            .use_short_form();
        // Long form joins; the declared short form renders as pairs.
        let tokens = builder.build(&options).unwrap();
        assert_eq!(tokens, ["borg", "create", "-P", "x", "-P", "y", "daily"]);
    }
}
