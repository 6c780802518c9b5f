//! Emitted schedule actions.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use voltway_core::LocationId;

/// What a plan step does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// The truck is ready at the origin.
    Start,
    /// Detour to a charging station.
    DriveToCharger,
    /// Charging at a station up to the ceiling.
    Charging,
    /// Drive to the next scheduled tour location.
    DriveToStop,
}

impl StepKind {
    /// Snake-case name used in serialised plans.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::DriveToCharger => "drive_to_charger",
            Self::Charging => "charging",
            Self::DriveToStop => "drive_to_stop",
        }
    }
}

/// One action of a schedule.
///
/// Steps are appended in time order and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanStep {
    /// Action performed.
    pub kind: StepKind,
    /// Departure location; absent for the start step.
    pub from: Option<LocationId>,
    /// Location reached, or charged at.
    pub to: LocationId,
    /// Wall-clock start.
    pub start: NaiveDateTime,
    /// Wall-clock end.
    pub end: NaiveDateTime,
    /// Charge after the step in kWh.
    pub soc_kwh: f64,
    /// Distance driven; absent for charging.
    pub distance_km: Option<f64>,
    /// Cost incurred by the step.
    pub cost: f64,
}
