//! CLI module for bookshelf
//!
//! Parses arguments, resolves configuration and starts the HTTP server.

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command, StartArgs};
pub use commands::{resolve_config, run, start};
pub use errors::{CliError, CliErrorCode, CliResult};
