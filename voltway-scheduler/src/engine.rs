//! Battery simulation over a fixed tour.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use voltway_core::{DistanceMatrix, LocationId, StationId, StationTable, TruckSpec};

use crate::{
    LegModel, SchedulePolicy, ScheduleError, StationSelector, StepKind, Tour, TruckState,
};

/// Walks a tour leg by leg, inserting charging detours whenever the next
/// leg would end below the reserve.
///
/// The engine reads its inputs and owns nothing shared. Identical inputs
/// produce identical plans.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use voltway_core::LocationId;
/// use voltway_core::test_support::{matrix_from_pairs, sample_truck};
/// use voltway_scheduler::{SchedulePolicy, ScheduleEngine, StepKind, Tour};
///
/// let a = LocationId::city("A");
/// let b = LocationId::city("B");
/// let matrix = matrix_from_pairs(&[a.clone(), b.clone()], &[(a.clone(), b.clone(), 100.0)])
///     .expect("valid matrix");
/// let stations = Default::default();
/// let truck = sample_truck();
/// let engine = ScheduleEngine::new(&matrix, &stations, &truck, SchedulePolicy::default());
/// let start = NaiveDate::from_ymd_opt(2025, 1, 1)
///     .and_then(|d| d.and_hms_opt(8, 0, 0))
///     .expect("valid time");
///
/// let state = engine
///     .run(&Tour::round_trip(a, [b]), start)
///     .expect("feasible without charging");
/// assert!(state.plan().iter().all(|step| step.kind != StepKind::Charging));
/// ```
pub struct ScheduleEngine<'a> {
    matrix: &'a DistanceMatrix,
    stations: &'a StationTable,
    truck: &'a TruckSpec,
    policy: SchedulePolicy,
}

impl<'a> ScheduleEngine<'a> {
    /// Construct an engine over one request's inputs.
    #[must_use]
    pub const fn new(
        matrix: &'a DistanceMatrix,
        stations: &'a StationTable,
        truck: &'a TruckSpec,
        policy: SchedulePolicy,
    ) -> Self {
        Self {
            matrix,
            stations,
            truck,
            policy,
        }
    }

    /// Policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &SchedulePolicy {
        &self.policy
    }

    /// Simulate `tour` departing at `start_time`.
    ///
    /// Dwell time follows every tour location except the last one.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidPolicy`] for unusable policy values.
    /// - [`ScheduleError::EmptyTour`] for tours shorter than two locations.
    /// - [`ScheduleError::UnknownLocation`] when a tour location has no
    ///   matrix row.
    /// - [`ScheduleError::InfeasibleRoute`] when a leg cannot be completed
    ///   above the reserve and no station is reachable. No partial plan is
    ///   returned.
    pub fn run(&self, tour: &Tour, start_time: NaiveDateTime) -> Result<TruckState, ScheduleError> {
        self.policy.validate(self.truck)?;
        let locations = tour.locations();
        let Some(origin) = locations.first() else {
            return Err(ScheduleError::EmptyTour { len: 0 });
        };
        if let Some(missing) = locations.iter().find(|id| !self.matrix.contains(id)) {
            return Err(ScheduleError::UnknownLocation {
                id: missing.clone(),
            });
        }

        let selector = StationSelector::new(
            self.matrix,
            self.stations,
            self.truck,
            self.policy.strategy,
        );
        let legs = LegModel::new(self.truck, &self.policy);
        let mut state = TruckState::start(
            origin.clone(),
            start_time,
            self.policy.initial_soc(self.truck),
        );

        let final_index = locations.len().saturating_sub(1);
        for (index, destination) in locations.iter().enumerate().skip(1) {
            state = self.drive_leg(state, destination, &selector, &legs)?;
            if index < final_index {
                state = state.apply_dwell(self.policy.dwell_minutes);
            }
        }

        log::info!(
            "scheduled {} legs with {} steps; cost {:.2}, final charge {:.1} kWh",
            tour.leg_count(),
            state.plan().len(),
            state.total_cost(),
            state.soc_kwh()
        );
        Ok(state)
    }

    /// Drive from the current location to `destination`, charging as often
    /// as needed to keep the arrival charge at or above the reserve.
    ///
    /// Stations used on this leg are excluded from later picks on the same
    /// leg. The exclusion set starts empty for every leg.
    #[expect(
        clippy::float_arithmetic,
        reason = "feasibility compares remaining charge against the reserve"
    )]
    fn drive_leg(
        &self,
        start: TruckState,
        destination: &LocationId,
        selector: &StationSelector<'_>,
        legs: &LegModel,
    ) -> Result<TruckState, ScheduleError> {
        let reserve_kwh = self.policy.reserve_kwh(self.truck);
        let ceiling_kwh = self.truck.battery_80_kwh();
        let mut excluded: BTreeSet<StationId> = BTreeSet::new();
        let mut state = start;
        let mut leg = legs.measure(self.matrix, state.location(), destination)?;

        while state.soc_kwh() - leg.energy_kwh < reserve_kwh {
            let candidate = selector.pick(state.location(), state.soc_kwh(), &excluded)?;
            excluded.insert(candidate.station.id.clone());
            let detour = legs.between(
                state.location().clone(),
                candidate.station.location_id(),
                candidate.distance_km,
            );
            state = state
                .apply_drive(&detour, StepKind::DriveToCharger)
                .apply_charge(candidate.station, ceiling_kwh);
            leg = legs.measure(self.matrix, state.location(), destination)?;
        }

        Ok(state.apply_drive(&leg, StepKind::DriveToStop))
    }
}

/// Simulate `tour` and return the resulting plan.
///
/// # Errors
/// Propagates every [`ScheduleError`] from [`ScheduleEngine::run`].
pub fn compute_schedule(
    matrix: &DistanceMatrix,
    stations: &StationTable,
    tour: &Tour,
    truck: &TruckSpec,
    policy: SchedulePolicy,
    start_time: NaiveDateTime,
) -> Result<Vec<crate::PlanStep>, ScheduleError> {
    ScheduleEngine::new(matrix, stations, truck, policy)
        .run(tour, start_time)
        .map(TruckState::into_plan)
}
