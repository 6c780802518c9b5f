//! End-to-end tests for the planning pipeline and route enrichment.

use rstest::{fixture, rstest};
use voltway_core::test_support::{sample_truck, station};
use voltway_core::{CityTable, LocationId, StationTable};
use voltway_scheduler::test_support::{FixedGeometryProvider, UnroutableGeometryProvider, at};
use voltway_scheduler::{
    GeometryError, PlanRequest, PlanningError, RoutePoint, RouteResponse, RouteStep,
    SchedulePolicy, ScheduleError, StepKind, build_matrix_and_stations, enrich_route, plan_route,
};

#[fixture]
fn cities() -> CityTable {
    let mut cities = CityTable::new();
    cities.insert("Ingolstadt", 48.766, 11.421);
    cities.insert("Halle", 51.482, 11.966);
    cities
}

#[fixture]
fn stations() -> StationTable {
    [
        station("IN-1", 48.80, 11.45, 150.0, 0.30),
        station("MID-1", 50.10, 11.70, 350.0, 0.45),
        station("HAL-1", 51.45, 12.00, 50.0, 0.25),
        station("KI-1", 54.32, 10.13, 350.0, 0.20),
    ]
    .into_iter()
    .collect()
}

fn request(stops: &[&str]) -> PlanRequest {
    PlanRequest {
        origin: "Ingolstadt".to_owned(),
        stops: stops.iter().map(|stop| (*stop).to_owned()).collect(),
        start_time: at(8, 0),
        policy: SchedulePolicy::default(),
    }
}

#[rstest]
fn stations_beyond_ceiling_range_are_pruned(cities: CityTable, stations: StationTable) {
    let (matrix, filtered) =
        build_matrix_and_stations("Ingolstadt", &["Halle"], &cities, &stations, &sample_truck())
            .expect("known cities");

    let kept: Vec<&str> = filtered.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(kept, vec!["IN-1", "MID-1", "HAL-1"]);
    assert_eq!(matrix.len(), 5);
    assert!(!matrix.contains(&LocationId::station("KI-1")));
}

#[rstest]
fn unknown_stop_is_rejected(cities: CityTable, stations: StationTable) {
    let err = build_matrix_and_stations("Ingolstadt", &["Atlantis"], &cities, &stations, &sample_truck())
        .expect_err("unknown stop");
    assert_eq!(
        err,
        PlanningError::UnknownLocation {
            name: "Atlantis".to_owned()
        }
    );
}

#[rstest]
fn empty_stop_list_is_rejected(cities: CityTable, stations: StationTable) {
    let stops: [&str; 0] = [];
    let err = build_matrix_and_stations("Ingolstadt", &stops, &cities, &stations, &sample_truck())
        .expect_err("no stops");
    assert_eq!(err, PlanningError::NoStops);
}

#[rstest]
fn round_trip_is_planned_with_coordinates(cities: CityTable, stations: StationTable) {
    let planned = plan_route(&request(&["Halle"]), &cities, &stations, &sample_truck())
        .expect("feasible round trip");

    let charged_at: Vec<String> = planned
        .plan
        .iter()
        .filter(|step| step.kind == StepKind::Charging)
        .map(|step| step.to.to_string())
        .collect();
    assert_eq!(charged_at, vec!["MID-1", "HAL-1", "MID-1"]);
    assert_eq!(
        planned.plan.last().map(|step| step.to.clone()),
        Some(LocationId::city("Ingolstadt"))
    );
    assert_eq!(planned.route.route.len(), planned.plan.len());
    assert!(planned.route.route.iter().all(|step| step.position().is_some()));

    let summary = planned.summary.expect("non-empty plan");
    assert_eq!(summary.charging_stops, 3);
    assert_eq!(summary.departure, at(8, 0));
    assert!(summary.total_cost > 0.0);
}

#[rstest]
fn infeasible_pipeline_surfaces_schedule_error(cities: CityTable) {
    let only_far_away: StationTable = [station("KI-1", 54.32, 10.13, 350.0, 0.20)]
        .into_iter()
        .collect();
    let err = plan_route(&request(&["Halle"]), &cities, &only_far_away, &sample_truck())
        .expect_err("no reachable station");
    assert!(matches!(
        err,
        PlanningError::Schedule(ScheduleError::InfeasibleRoute { .. })
    ));
}

fn route_step(location: &str, position: Option<(f64, f64)>, action: StepKind) -> RouteStep {
    RouteStep {
        time: "08:00".to_owned(),
        location: location.to_owned(),
        latitude: position.map(|(lat, _)| lat),
        longitude: position.map(|(_, lon)| lon),
        points: Vec::new(),
        action,
        duration_minutes: 0,
        soc: 0,
        why: String::new(),
    }
}

#[fixture]
fn display_route() -> RouteResponse {
    RouteResponse {
        route: vec![
            route_step("Ingolstadt", Some((48.766, 11.421)), StepKind::Start),
            route_step("MID-1", Some((50.1, 11.7)), StepKind::DriveToCharger),
            route_step("MID-1", Some((50.1, 11.7)), StepKind::Charging),
            route_step("Nowhere", None, StepKind::DriveToStop),
            route_step("Halle", Some((51.482, 11.966)), StepKind::DriveToStop),
        ],
        total_distance_km: 0.0,
        total_duration_hours: 0.0,
    }
}

#[rstest]
fn enrichment_routes_only_moving_steps(mut display_route: RouteResponse) {
    let provider = FixedGeometryProvider::new(150_000.0, 5_400.0);

    enrich_route(&mut display_route, &provider).expect("provider succeeds");

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls.first().map(|(from, _)| *from),
        Some(RoutePoint {
            latitude: 48.766,
            longitude: 11.421
        })
    );
    assert!((display_route.total_distance_km - 150.0).abs() < 1e-9);
    assert!((display_route.total_duration_hours - 1.5).abs() < 1e-9);
    let points: Vec<usize> = display_route
        .route
        .iter()
        .map(|step| step.points.len())
        .collect();
    assert_eq!(points, vec![0, 2, 0, 0, 0]);
}

#[rstest]
fn enrichment_propagates_provider_failure(mut display_route: RouteResponse) {
    let err = enrich_route(&mut display_route, &UnroutableGeometryProvider)
        .expect_err("provider fails");
    assert!(matches!(err, GeometryError::NoRoute { .. }));
}
