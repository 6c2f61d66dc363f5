//! CLI argument definitions using clap
//!
//! Commands:
//! - bookshelf [start] [--config <path>] [--host <host>] [--port <port>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bookshelf - an in-memory book catalogue served over HTTP
#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    // used when no subcommand is given
    #[command(flatten)]
    pub start: StartArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server (the default)
    Start(StartArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct StartArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Host to bind to, overrides the config file
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to, overrides the config file
    #[arg(long)]
    pub port: Option<u16>,

    /// Start with an empty catalogue
    #[arg(long)]
    pub no_seed: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Arguments for the server, whichever form they were given in
    pub fn start_args(self) -> StartArgs {
        match self.command {
            Some(Command::Start(args)) => args,
            None => self.start,
        }
    }
}
