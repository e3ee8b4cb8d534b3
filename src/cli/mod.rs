mod commands;
mod core;
mod dashboard;
mod help;
pub mod output;
mod shell;

pub use self::core::{CliError, CliMode, CommandError};
pub use shell::{run_cli, SCRIPT_ENV};
