//! Declarative argument-vector construction for external CLI tools.
//!
//! This crate turns a declarative description of an external command-line
//! tool into correctly ordered, correctly formatted argument vectors:
//!
//! - [`ParamStyle`] — the closed registry of parameter rendering styles
//!   (flag, space- or `=`-joined values, and the three list expansions).
//! - [`ParameterSpec`] / [`SynopsisSpec`] / [`CommandSpec`] — the immutable
//!   definition of a command's parameters, nested subcommands, and ordered
//!   synopsis (positional) arguments.
//! - [`CommandBuilder`] — a per-invocation accumulator recording parameter
//!   assignments and subcommand selections in call order.
//! - [`BuildOptions`] — render-time choices: synopsis values and
//!   short-form substitution.
//! - [`CommandCatalog`] / [`DefinitionDocument`] — versioned bundles of
//!   definitions, loadable from JSON or YAML files.
//!
//! Validation ([`validate_spec`], [`validate_catalog`]) catches authoring
//! errors such as duplicate parameters, subcommand cycles, and misordered
//! synopsis sequences before builders rely on them.
//!
//! The crate never executes anything: the output of
//! [`CommandBuilder::build`] is a `Vec<String>` handed to whatever layer
//! spawns the external process.
//!
//! # Example
//!
//! ```
//! use command_invoke_core::*;
//!
//! // Describe the shape of an external tool once.
//! let spec = CommandSpec::new("restic")
//!     .with_parameter(ParameterSpec::flag("--verbose").with_short("-v", ParamStyle::Flag))
//!     .with_subcommand(
//!         CommandSpec::new("backup")
//!             .with_parameter(ParameterSpec::separate("--tag"))
//!             .with_parameter(ParameterSpec::joined("--exclude"))
//!             .with_synopsis(SynopsisSpec::required("path")),
//!     );
//! assert!(validate_spec(&spec).is_empty());
//!
//! // Accumulate one invocation and render it.
//! let mut builder = CommandBuilder::new(&spec);
//! builder.param("--verbose")?;
//! builder.command("backup")?;
//! builder.param_value("--tag", ["nightly", "home"])?;
//! builder.param_value("--exclude", ["*.tmp", "*.o"])?;
//!
//! let tokens = builder.build(&BuildOptions::new().with_synopsis_value("path", "/home"))?;
//! assert_eq!(
//!     tokens,
//!     [
//!         "restic", "--verbose", "backup", "--tag", "nightly", "--tag", "home",
//!         "--exclude", "*.tmp,*.o", "/home"
//!     ]
//! );
//! # Ok::<(), BuildError>(())
//! ```

mod builder;
mod catalog;
mod render;
mod style;
mod types;
mod validate;

pub use builder::{BuildError, BuildOptions, CommandBuilder, ParamValue};
pub use catalog::{CATALOG_CONTRACT_VERSION, CatalogError, CommandCatalog, DefinitionDocument};
pub use style::ParamStyle;
pub use types::{CommandSpec, DEFAULT_JOIN_DELIMITER, ParameterSpec, SynopsisSpec};
pub use validate::{ValidationError, validate_catalog, validate_spec};
