//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod list;
pub mod paths;
pub mod resolve;

use crate::app::AppContext;
use crate::error::Result;

pub fn run(ctx: &mut AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::List(args) => list::run(ctx, args),
        Commands::Resolve(args) => resolve::run(ctx, args),
        Commands::Paths(args) => paths::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every skill visible from the working directory
    List(list::ListArgs),
    /// Resolve named skills and print their content or injection block
    Resolve(resolve::ResolveArgs),
    /// Show the search paths a resolution would visit
    Paths(paths::PathsArgs),
}
