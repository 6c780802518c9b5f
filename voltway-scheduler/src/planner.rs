//! Request pipeline: resolve cities, prune stations, build the matrix,
//! schedule and convert to a route.

use chrono::NaiveDateTime;
use voltway_core::{CityTable, DistanceMatrix, Location, LocationId, StationTable, TruckSpec};

use crate::{
    PlanStep, PlanningError, RouteResponse, SchedulePolicy, ScheduleEngine, ScheduleSummary, Tour,
    to_route,
};

/// One scheduling request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    /// City the tour leaves from and returns to.
    pub origin: String,
    /// Cities to visit, in order.
    pub stops: Vec<String>,
    /// Departure time.
    pub start_time: NaiveDateTime,
    /// Scheduling assumptions.
    pub policy: SchedulePolicy,
}

/// Everything produced for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    /// Raw schedule steps.
    pub plan: Vec<PlanStep>,
    /// Totals over the plan.
    pub summary: Option<ScheduleSummary>,
    /// Display route.
    pub route: RouteResponse,
}

fn resolve(cities: &CityTable, name: &str) -> Result<Location, PlanningError> {
    cities
        .location(name)
        .ok_or_else(|| PlanningError::UnknownLocation {
            name: name.to_owned(),
        })
}

/// Prune `stations` to the truck's ceiling range around every tour city and
/// build the distance matrix over the cities and the remaining stations.
///
/// # Errors
/// - [`PlanningError::UnknownLocation`] when a city is missing.
/// - [`PlanningError::NoStops`] when `stops` is empty.
/// - [`PlanningError::Matrix`] when fewer than two distinct locations remain.
pub fn build_matrix_and_stations<S>(
    origin: &str,
    stops: &[S],
    cities: &CityTable,
    stations: &StationTable,
    truck: &TruckSpec,
) -> Result<(DistanceMatrix, StationTable), PlanningError>
where
    S: AsRef<str>,
{
    if stops.is_empty() {
        return Err(PlanningError::NoStops);
    }
    let mut tour_locations = vec![resolve(cities, origin)?];
    for stop in stops {
        tour_locations.push(resolve(cities, stop.as_ref())?);
    }

    let references: Vec<_> = tour_locations.iter().map(|location| location.position).collect();
    let filtered = stations.within_radius(&references, truck.range_80_km());
    let matrix = DistanceMatrix::build_for_tour(&tour_locations, filtered.as_slice())
        .map_err(PlanningError::Matrix)?;
    Ok((matrix, filtered))
}

/// Run the whole pipeline for `request`.
///
/// # Errors
/// Returns [`PlanningError`] for lookup and matrix failures and wraps
/// [`ScheduleError`](crate::ScheduleError) from the engine, including an
/// infeasible route.
pub fn plan_route(
    request: &PlanRequest,
    cities: &CityTable,
    stations: &StationTable,
    truck: &TruckSpec,
) -> Result<PlannedRoute, PlanningError> {
    let (matrix, filtered) =
        build_matrix_and_stations(&request.origin, &request.stops, cities, stations, truck)?;
    let tour = Tour::round_trip(
        LocationId::city(request.origin.as_str()),
        request.stops.iter().map(|stop| LocationId::city(stop.as_str())),
    );
    let state = ScheduleEngine::new(&matrix, &filtered, truck, request.policy.clone())
        .run(&tour, request.start_time)?;
    let plan = state.into_plan();
    let route = to_route(&plan, cities, stations);
    Ok(PlannedRoute {
        summary: ScheduleSummary::from_plan(&plan),
        plan,
        route,
    })
}
