//! Command-line interface for planning electric truck tours.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod plan;

pub use error::CliError;

use plan::{PlanArgs, run_plan};

const ARG_PLAN_DATA_DIR: &str = "data-dir";
const ARG_PLAN_ORIGIN: &str = "origin";
const ARG_PLAN_STOP: &str = "stop";
const ARG_PLAN_TRUCK_MODEL: &str = "truck-model";
const ARG_PLAN_START_TIME: &str = "start-time";
const ARG_PLAN_DATE: &str = "date";
const ARG_PLAN_STRATEGY: &str = "strategy";
const ENV_PLAN_ORIGIN: &str = "VOLTWAY_CMDS_PLAN_ORIGIN";
const ENV_PLAN_STOP: &str = "VOLTWAY_CMDS_PLAN_STOP";
const ENV_PLAN_TRUCK_MODEL: &str = "VOLTWAY_CMDS_PLAN_TRUCK_MODEL";
const ENV_PLAN_START_TIME: &str = "VOLTWAY_CMDS_PLAN_START_TIME";

/// Run the Voltway CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration merging,
/// reference data loading or planning fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "voltway",
    about = "Energy-aware tour scheduling for battery-electric trucks",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Schedule a round trip and print the route as JSON.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
