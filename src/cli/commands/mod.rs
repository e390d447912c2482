//! Command implementations for the estaciones CLI
//!
//! This module contains the command execution logic and output rendering for
//! the CLI interface. Each command is implemented in its own module.

pub mod dashboard;
pub mod legend;
pub mod lookup;
pub mod normalize;
pub mod shared;
pub mod watch;

pub use shared::CommandStats;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Dispatches to the subcommand handler:
/// - `normalize`: Normalized, ranked station list
/// - `lookup`: Single station by name
/// - `dashboard`: Cards, chart and map from a snapshot directory
/// - `legend`: Temperature band legend
/// - `watch`: Periodic re-normalization of a payload file
pub async fn run(args: Args) -> Result<CommandStats> {
    let Some(command) = args.command else {
        return Err(Error::configuration("No command given"));
    };

    match command {
        Commands::Normalize(normalize_args) => normalize::run_normalize(normalize_args).await,
        Commands::Lookup(lookup_args) => lookup::run_lookup(lookup_args).await,
        Commands::Dashboard(dashboard_args) => dashboard::run_dashboard(dashboard_args).await,
        Commands::Legend(legend_args) => legend::run_legend(legend_args).await,
        Commands::Watch(watch_args) => watch::run_watch(watch_args).await,
    }
}
