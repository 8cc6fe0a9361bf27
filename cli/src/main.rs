use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use command_invoke_core::{
    BuildOptions, CommandBuilder, CommandSpec, DefinitionDocument, validate_catalog, validate_spec,
};

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    /// One token per line.
    Lines,
    /// JSON array of tokens.
    Json,
    /// Single shell-quoted command line.
    Shell,
}

#[derive(Debug, Parser)]
#[command(name = "command-invoke")]
#[command(about = "Render and validate external-tool invocation definitions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render an argument vector from a definition file and a list of ops.
    Render(RenderArgs),
    /// Validate one or more definition files.
    Validate(ValidateArgs),
    /// Print a structural summary of a definition file.
    Show(ShowArgs),
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Definition file (bare definition or catalog, JSON or YAML).
    definition: PathBuf,
    /// Ops applied in order after `--`: `@sub` selects a subcommand,
    /// `name` sets a flag, `name=value` sets a value (comma-split for
    /// list parameters).
    #[arg(last = true)]
    ops: Vec<String>,
    /// Command to select when the definition file is a catalog.
    #[arg(long)]
    name: Option<String>,
    /// Synopsis value as NAME=VALUE (repeatable).
    #[arg(long = "positional", value_name = "NAME=VALUE")]
    positional: Vec<String>,
    /// Render short forms where parameters declare them.
    #[arg(long)]
    short: bool,
    /// Output format (default: lines).
    #[arg(long, default_value = "lines")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Definition files to validate.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Definition file (bare definition or catalog, JSON or YAML).
    definition: PathBuf,
    /// Command to select when the definition file is a catalog.
    #[arg(long)]
    name: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Render(args) => run_render(args),
        Command::Validate(args) => run_validate(args),
        Command::Show(args) => run_show(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn load_document(path: &Path) -> Result<DefinitionDocument, String> {
    DefinitionDocument::from_path(path)
        .map_err(|err| format!("Failed to load '{}': {err}", path.display()))
}

fn run_render(args: RenderArgs) -> Result<(), String> {
    let document = load_document(&args.definition)?;
    let spec = document
        .resolve(args.name.as_deref())
        .map_err(|err| err.to_string())?;

    let mut builder = CommandBuilder::new(spec);
    for op in &args.ops {
        apply_op(&mut builder, op)?;
    }

    let mut options = BuildOptions::new();
    if args.short {
        options = options.use_short_form();
    }
    for entry in &args.positional {
        let (name, value) = entry.split_once('=').ok_or_else(|| {
            format!("--positional expects NAME=VALUE, got '{entry}'")
        })?;
        options = options.with_synopsis_value(name, value);
    }

    let tokens = builder.build(&options).map_err(|err| err.to_string())?;
    print_tokens(&tokens, args.format)
}

/// Applies one render op against the builder.
///
/// `@name` selects a subcommand; `name` records a flag; `name=value`
/// records a value, comma-split into a list when the parameter's style is
/// list-capable.
fn apply_op(builder: &mut CommandBuilder<'_>, op: &str) -> Result<(), String> {
    if let Some(subcommand) = op.strip_prefix('@') {
        builder
            .command(subcommand)
            .map_err(|err| err.to_string())?;
        return Ok(());
    }

    match op.split_once('=') {
        None => builder.param(op).map_err(|err| err.to_string())?,
        Some((name, value)) => {
            let is_list = builder
                .current_scope()
                .find_parameter(name)
                .is_some_and(|parameter| parameter.style.accepts_list());
            if is_list {
                let items: Vec<String> = value.split(',').map(String::from).collect();
                builder
                    .param_value(name, items)
                    .map_err(|err| err.to_string())?
            } else {
                builder
                    .param_value(name, value)
                    .map_err(|err| err.to_string())?
            }
        }
    };
    Ok(())
}

fn print_tokens(tokens: &[String], format: CliOutputFormat) -> Result<(), String> {
    match format {
        CliOutputFormat::Lines => {
            for token in tokens {
                println!("{token}");
            }
        }
        CliOutputFormat::Json => {
            let json = serde_json::to_string(tokens)
                .map_err(|err| format!("Failed to encode tokens: {err}"))?;
            println!("{json}");
        }
        CliOutputFormat::Shell => {
            let quoted: Vec<String> = tokens.iter().map(|t| shell_quote(t)).collect();
            println!("{}", quoted.join(" "));
        }
    }
    Ok(())
}

/// Quotes a token for copy-paste into a POSIX shell.
fn shell_quote(token: &str) -> String {
    let safe = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./:=@%+,".contains(c));
    if safe {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', "'\\''"))
    }
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let mut failures = 0usize;

    for path in &args.inputs {
        let errors = match load_document(path) {
            Ok(DefinitionDocument::Spec(spec)) => validate_spec(&spec),
            Ok(DefinitionDocument::Catalog(catalog)) => validate_catalog(&catalog),
            Err(err) => {
                eprintln!("{}: {err}", path.display());
                failures += 1;
                continue;
            }
        };

        if errors.is_empty() {
            println!("{}: ok", path.display());
        } else {
            for error in &errors {
                eprintln!("{}: {error}", path.display());
            }
            failures += 1;
        }
    }

    if failures > 0 {
        Err(format!("{failures} definition file(s) failed validation"))
    } else {
        Ok(())
    }
}

fn run_show(args: ShowArgs) -> Result<(), String> {
    let document = load_document(&args.definition)?;
    let spec = document
        .resolve(args.name.as_deref())
        .map_err(|err| err.to_string())?;
    print_spec(spec, 0);
    Ok(())
}

fn print_spec(spec: &CommandSpec, depth: usize) {
    let indent = "  ".repeat(depth);
    match &spec.description {
        Some(description) => println!("{indent}{} - {description}", spec.name),
        None => println!("{indent}{}", spec.name),
    }

    for parameter in &spec.parameters {
        let short = match (&parameter.short_name, parameter.short_style) {
            (Some(name), Some(style)) => format!(" (short: {name} {style})"),
            _ => String::new(),
        };
        println!(
            "{indent}  {} [{}]{short}",
            parameter.name, parameter.style
        );
    }

    for entry in &spec.synopsis {
        let marker = if entry.required { "required" } else { "optional" };
        println!("{indent}  <{}> ({marker})", entry.name);
    }

    for subcommand in &spec.subcommands {
        print_spec(subcommand, depth + 1);
    }
}
