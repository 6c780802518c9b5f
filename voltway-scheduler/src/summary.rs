//! Aggregate figures over a finished plan.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{PlanStep, StepKind};

/// Totals derived from a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Start of the first step.
    pub departure: NaiveDateTime,
    /// End of the last step.
    pub arrival: NaiveDateTime,
    /// Kilometres driven, detours included.
    pub distance_km: f64,
    /// Minutes spent driving.
    pub driving_minutes: i64,
    /// Minutes spent charging.
    pub charging_minutes: i64,
    /// Number of charging steps.
    pub charging_stops: usize,
    /// Energy added across all charging steps.
    pub energy_charged_kwh: f64,
    /// Driving plus charging cost.
    pub total_cost: f64,
    /// Charge after the last step.
    pub final_soc_kwh: f64,
}

impl ScheduleSummary {
    /// Summarise `plan`; `None` when it is empty.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "distances, energy and cost are summed over steps"
    )]
    pub fn from_plan(plan: &[PlanStep]) -> Option<Self> {
        let first = plan.first()?;
        let last = plan.last()?;
        let mut summary = Self {
            departure: first.start,
            arrival: last.end,
            distance_km: 0.0,
            driving_minutes: 0,
            charging_minutes: 0,
            charging_stops: 0,
            energy_charged_kwh: 0.0,
            total_cost: 0.0,
            final_soc_kwh: last.soc_kwh,
        };
        let mut previous_soc = first.soc_kwh;
        for step in plan {
            let elapsed = (step.end - step.start).num_minutes();
            match step.kind {
                StepKind::Start => {}
                StepKind::Charging => {
                    summary.charging_minutes += elapsed;
                    summary.charging_stops += 1;
                    summary.energy_charged_kwh += step.soc_kwh - previous_soc;
                }
                StepKind::DriveToCharger | StepKind::DriveToStop => {
                    summary.driving_minutes += elapsed;
                    summary.distance_km += step.distance_km.unwrap_or_default();
                }
            }
            summary.total_cost += step.cost;
            previous_soc = step.soc_kwh;
        }
        Some(summary)
    }
}
