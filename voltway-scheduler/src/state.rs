//! The simulation cursor and its transitions.
//!
//! Every transition consumes a [`TruckState`] and returns the next one, so
//! each can be exercised on its own.

use chrono::{NaiveDateTime, TimeDelta};
use voltway_core::{ChargingStation, LocationId};

use crate::{Leg, PlanStep, StepKind};

/// Time, position, charge and accumulated plan of one scheduling run.
#[derive(Debug, Clone, PartialEq)]
pub struct TruckState {
    time: NaiveDateTime,
    location: LocationId,
    soc_kwh: f64,
    total_cost: f64,
    plan: Vec<PlanStep>,
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "fractional minutes are rounded to whole milliseconds"
)]
fn minutes(value: f64) -> TimeDelta {
    TimeDelta::milliseconds((value * 60_000.0).round() as i64)
}

impl TruckState {
    /// Place the truck at `location` and record the start step.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use voltway_core::LocationId;
    /// use voltway_scheduler::{StepKind, TruckState};
    ///
    /// let at = NaiveDate::from_ymd_opt(2025, 1, 1)
    ///     .and_then(|d| d.and_hms_opt(9, 0, 0))
    ///     .expect("valid time");
    /// let state = TruckState::start(LocationId::city("Ingolstadt"), at, 320.0);
    /// assert_eq!(state.plan().len(), 1);
    /// assert_eq!(state.plan()[0].kind, StepKind::Start);
    /// ```
    #[must_use]
    pub fn start(location: LocationId, time: NaiveDateTime, soc_kwh: f64) -> Self {
        let step = PlanStep {
            kind: StepKind::Start,
            from: None,
            to: location.clone(),
            start: time,
            end: time,
            soc_kwh,
            distance_km: Some(0.0),
            cost: 0.0,
        };
        Self {
            time,
            location,
            soc_kwh,
            total_cost: 0.0,
            plan: vec![step],
        }
    }

    /// Drive `leg` and record it as `kind`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "charge and cost accumulate per leg"
    )]
    pub fn apply_drive(mut self, leg: &Leg, kind: StepKind) -> Self {
        let end = self.time + minutes(leg.travel_minutes);
        let soc_kwh = self.soc_kwh - leg.energy_kwh;
        self.plan.push(PlanStep {
            kind,
            from: Some(leg.from.clone()),
            to: leg.to.clone(),
            start: self.time,
            end,
            soc_kwh,
            distance_km: Some(leg.distance_km),
            cost: leg.cost,
        });
        self.time = end;
        self.location = leg.to.clone();
        self.soc_kwh = soc_kwh;
        self.total_cost += leg.cost;
        self
    }

    /// Charge at `station` up to `ceiling_kwh`.
    ///
    /// Charging always fills to the ceiling. A truck already at or above it
    /// adds nothing and pays nothing.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "charging time and cost derive from energy added"
    )]
    pub fn apply_charge(mut self, station: &ChargingStation, ceiling_kwh: f64) -> Self {
        let added_kwh = (ceiling_kwh - self.soc_kwh).max(0.0);
        let end = self.time + minutes(added_kwh / station.max_power_kw * 60.0);
        let cost = added_kwh * station.price_per_kwh;
        let soc_kwh = self.soc_kwh + added_kwh;
        let at = station.location_id();
        log::debug!(
            "charging {added_kwh:.1} kWh at {} ({} kW)",
            station.id,
            station.max_power_kw
        );
        self.plan.push(PlanStep {
            kind: StepKind::Charging,
            from: Some(at.clone()),
            to: at.clone(),
            start: self.time,
            end,
            soc_kwh,
            distance_km: None,
            cost,
        });
        self.time = end;
        self.location = at;
        self.soc_kwh = soc_kwh;
        self.total_cost += cost;
        self
    }

    /// Wait at the current location for `dwell_minutes`.
    #[must_use]
    pub fn apply_dwell(mut self, dwell_minutes: u32) -> Self {
        self.time += TimeDelta::minutes(i64::from(dwell_minutes));
        self
    }

    /// Current wall-clock time.
    #[must_use]
    pub const fn time(&self) -> NaiveDateTime {
        self.time
    }

    /// Current location.
    #[must_use]
    pub const fn location(&self) -> &LocationId {
        &self.location
    }

    /// Current charge in kWh.
    #[must_use]
    pub const fn soc_kwh(&self) -> f64 {
        self.soc_kwh
    }

    /// Cost accumulated so far.
    #[must_use]
    pub const fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Steps recorded so far.
    #[must_use]
    pub fn plan(&self) -> &[PlanStep] {
        &self.plan
    }

    /// Consume the state, keeping only the plan.
    #[must_use]
    pub fn into_plan(self) -> Vec<PlanStep> {
        self.plan
    }
}
