//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub mod ask;
pub mod options;
pub mod recommend;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Ask(args) => ask::run(ctx, args),
        Commands::Recommend(args) => recommend::run(ctx, args),
        Commands::Options(args) => options::run(ctx, args),
    }
}
