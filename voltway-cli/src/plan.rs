//! Plan command implementation for the Voltway CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{Local, NaiveDate};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use voltway_data::{DataPaths, validate_and_load};
use voltway_scheduler::{
    PlanRequest, RouteResponse, ScheduleSummary, SchedulePolicy, Strategy, plan_route,
};

use crate::{
    ARG_PLAN_DATA_DIR, ARG_PLAN_DATE, ARG_PLAN_ORIGIN, ARG_PLAN_START_TIME, ARG_PLAN_STOP,
    ARG_PLAN_STRATEGY, ARG_PLAN_TRUCK_MODEL, CliError, ENV_PLAN_ORIGIN, ENV_PLAN_START_TIME,
    ENV_PLAN_STOP, ENV_PLAN_TRUCK_MODEL,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Schedule a round trip from an origin city through the given \
                 stops and back, inserting charging stops whenever a leg would \
                 end below the battery reserve. Reference data is read from \
                 cities.json, truck_specs.json and charge_points.csv in the \
                 data directory.",
    about = "Plan an energy-aware round trip"
)]
#[ortho_config(prefix = "VOLTWAY")]
pub(crate) struct PlanArgs {
    /// Directory containing the reference data files.
    #[arg(long = ARG_PLAN_DATA_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) data_dir: Option<Utf8PathBuf>,
    /// City the tour starts from and returns to.
    #[arg(long = ARG_PLAN_ORIGIN, value_name = "city")]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Stop to visit; repeat for several stops, in visiting order.
    #[arg(long = ARG_PLAN_STOP, value_name = "city")]
    #[serde(default)]
    pub(crate) stop: Vec<String>,
    /// Truck model as named in the truck catalogue.
    #[arg(long = ARG_PLAN_TRUCK_MODEL, value_name = "model")]
    #[serde(default)]
    pub(crate) truck_model: Option<String>,
    /// Departure time as HH:MM.
    #[arg(long = ARG_PLAN_START_TIME, value_name = "HH:MM")]
    #[serde(default)]
    pub(crate) start_time: Option<String>,
    /// Departure date as YYYY-MM-DD; defaults to today.
    #[arg(long = ARG_PLAN_DATE, value_name = "YYYY-MM-DD")]
    #[serde(default)]
    pub(crate) date: Option<NaiveDate>,
    /// Station choice policy: time-optimal or cost-optimal.
    #[arg(long = ARG_PLAN_STRATEGY, value_name = "name")]
    #[serde(default)]
    pub(crate) strategy: Option<String>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    /// Reference data files.
    pub(crate) paths: DataPaths,
    /// Directory the paths were derived from.
    pub(crate) data_dir: Utf8PathBuf,
    /// Origin city.
    pub(crate) origin: String,
    /// Stops in visiting order.
    pub(crate) stops: Vec<String>,
    /// Truck model name.
    pub(crate) truck_model: String,
    /// Departure time as entered.
    pub(crate) start_time: String,
    /// Departure date.
    pub(crate) date: NaiveDate,
    /// Station choice policy.
    pub(crate) strategy: Strategy,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.paths.cities, "cities")?;
        Self::require_existing(&self.paths.trucks, "truck-specs")?;
        Self::require_existing(&self.paths.stations, "charge-points")?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match voltway_data::fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let origin = args.origin.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_ORIGIN,
            env: ENV_PLAN_ORIGIN,
        })?;
        if args.stop.is_empty() {
            return Err(CliError::MissingArgument {
                field: ARG_PLAN_STOP,
                env: ENV_PLAN_STOP,
            });
        }
        let truck_model = args.truck_model.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_TRUCK_MODEL,
            env: ENV_PLAN_TRUCK_MODEL,
        })?;
        let start_time = args.start_time.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_START_TIME,
            env: ENV_PLAN_START_TIME,
        })?;
        let strategy = args
            .strategy
            .as_deref()
            .map(Strategy::from_name_lossy)
            .unwrap_or_default();

        let data_dir = args.data_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        Ok(Self {
            paths: DataPaths::in_dir(&data_dir),
            data_dir,
            origin,
            stops: args.stop,
            truck_model,
            start_time,
            date: args.date.unwrap_or_else(|| Local::now().date_naive()),
            strategy,
        })
    }
}

/// JSON document printed by the `plan` command.
#[derive(Debug, Serialize)]
struct PlanOutput<'a> {
    #[serde(flatten)]
    route: &'a RouteResponse,
    summary: Option<&'a ScheduleSummary>,
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &mut stdout)
}

pub(super) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    execute_plan(&config, writer)
}

fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

pub(super) fn execute_plan(config: &PlanConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let loaded = validate_and_load(
        &config.data_dir,
        &config.origin,
        &config.stops,
        &config.truck_model,
        &config.start_time,
        config.date,
    )?;
    log::debug!(
        "planning {} with the {} strategy",
        config.origin,
        config.strategy
    );
    let request = PlanRequest {
        origin: loaded.request.origin,
        stops: loaded.request.stops,
        start_time: loaded.request.start_time,
        policy: SchedulePolicy::default().with_strategy(config.strategy),
    };
    let planned = plan_route(
        &request,
        &loaded.data.cities,
        &loaded.data.stations,
        &loaded.request.truck,
    )?;
    write_plan_output(
        writer,
        &PlanOutput {
            route: &planned.route,
            summary: planned.summary.as_ref(),
        },
    )
}

fn write_plan_output(writer: &mut dyn Write, output: &PlanOutput<'_>) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(output).map_err(CliError::SerializeRoute)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
