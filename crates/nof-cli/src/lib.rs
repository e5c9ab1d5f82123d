//! CLI argument model and command dispatch for the `nof-deploy` binary.

pub mod bootstrap_helpers;
pub mod cli_args;
pub mod cli_types;
pub mod commands;

pub use cli_args::Cli;
pub use cli_types::*;
pub use commands::{execute_cli, render_cli_output, runtime_config_from_cli, validate_cli};
