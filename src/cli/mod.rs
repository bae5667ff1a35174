//! Command-line interface definitions.

pub mod commands;

use std::path::PathBuf;

use clap::Parser;

pub use commands::Commands;

#[derive(Parser, Debug)]
#[command(name = "skilldex", version, about = "Resolve and inspect agent skills")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Working directory to resolve against (defaults to the current dir)
    #[arg(long, short = 'C', global = true)]
    pub cwd: Option<PathBuf>,

    /// Emit JSON instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all logging
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}
