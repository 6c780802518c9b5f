//! Behavioural tests for `ScheduleEngine` using rstest-bdd.

use std::cell::RefCell;
use std::collections::BTreeSet;

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use voltway_core::test_support::{matrix_from_pairs, sample_truck, station};
use voltway_core::{DistanceMatrix, LocationId, StationTable, TruckSpec};
use voltway_scheduler::test_support::{at, ingolstadt_halle_network};
use voltway_scheduler::{
    PlanStep, SchedulePolicy, ScheduleEngine, ScheduleError, StepKind, Strategy, Tour, TruckState,
};

#[derive(Debug, Default)]
struct ScheduleWorld {
    truck: RefCell<Option<TruckSpec>>,
    network: RefCell<Option<(DistanceMatrix, StationTable)>>,
    tour: RefCell<Option<Tour>>,
    strategy: RefCell<Strategy>,
    outcome: RefCell<Option<Result<TruckState, ScheduleError>>>,
}

impl ScheduleWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn schedule(&self) {
        let truck = self.truck.borrow().clone().expect("truck configured");
        let network = self.network.borrow();
        let (matrix, stations) = network.as_ref().expect("network configured");
        let tour = self.tour.borrow().clone().expect("tour configured");
        let policy = SchedulePolicy::default().with_strategy(*self.strategy.borrow());
        let outcome = ScheduleEngine::new(matrix, stations, &truck, policy).run(&tour, at(8, 0));
        self.outcome.replace(Some(outcome));
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn plan(&self) -> Vec<PlanStep> {
        self.outcome
            .borrow()
            .clone()
            .expect("schedule should run before assertions")
            .expect("schedule should succeed")
            .into_plan()
    }

    fn charging_stations(&self) -> Vec<String> {
        self.plan()
            .iter()
            .filter(|step| step.kind == StepKind::Charging)
            .map(|step| step.to.to_string())
            .collect()
    }

    fn drive_to_stop_steps(&self) -> Vec<PlanStep> {
        self.plan()
            .into_iter()
            .filter(|step| step.kind == StepKind::DriveToStop)
            .collect()
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn final_soc(&self) -> f64 {
        self.plan().last().expect("non-empty plan").soc_kwh
    }
}

fn hh_mm(time: NaiveDateTime) -> (u32, u32) {
    (time.hour(), time.minute())
}

fn one_way(from: &str, to: &str) -> Tour {
    Tour::new(vec![LocationId::city(from), LocationId::city(to)]).expect("two locations")
}

#[fixture]
fn world() -> ScheduleWorld {
    ScheduleWorld::default()
}

#[given("a truck with 400 kWh capacity, a 320 kWh ceiling and 1.2 kWh/km consumption")]
fn given_truck(world: &ScheduleWorld) {
    world.truck.replace(Some(sample_truck()));
}

#[given("the Ingolstadt and Halle network with a slow cheap and a fast expensive station")]
fn given_ingolstadt_halle(world: &ScheduleWorld) {
    world.network.replace(Some(ingolstadt_halle_network()));
    world.tour.replace(Some(Tour::round_trip(
        LocationId::city("Ingolstadt"),
        [LocationId::city("Halle")],
    )));
}

#[given("a 500 km leg with stations at 200 km and 400 km")]
fn given_long_leg(world: &ScheduleWorld) {
    let first = station("S1", 49.0, 11.0, 300.0, 0.35);
    let second = station("S2", 50.0, 11.0, 300.0, 0.35);
    let a = LocationId::city("A");
    let b = LocationId::city("B");
    let matrix = matrix_from_pairs(
        &[a.clone(), b.clone(), first.location_id(), second.location_id()],
        &[
            (a.clone(), b.clone(), 500.0),
            (a.clone(), first.location_id(), 200.0),
            (a, second.location_id(), 400.0),
            (b.clone(), first.location_id(), 300.0),
            (b, second.location_id(), 100.0),
            (first.location_id(), second.location_id(), 200.0),
        ],
    )
    .expect("valid matrix");
    world
        .network
        .replace(Some((matrix, [first, second].into_iter().collect())));
    world.tour.replace(Some(one_way("A", "B")));
}

#[given("a 100 km leg without stations")]
fn given_short_leg(world: &ScheduleWorld) {
    let a = LocationId::city("A");
    let b = LocationId::city("B");
    let matrix = matrix_from_pairs(&[a.clone(), b.clone()], &[(a.clone(), b.clone(), 100.0)])
        .expect("valid matrix");
    world.network.replace(Some((matrix, StationTable::new())));
    world.tour.replace(Some(Tour::round_trip(a, [b])));
}

#[given("a triangle of 40 km legs through two stops without stations")]
fn given_triangle(world: &ScheduleWorld) {
    let a = LocationId::city("A");
    let b = LocationId::city("B");
    let c = LocationId::city("C");
    let matrix = matrix_from_pairs(
        &[a.clone(), b.clone(), c.clone()],
        &[
            (a.clone(), b.clone(), 40.0),
            (b.clone(), c.clone(), 40.0),
            (a.clone(), c.clone(), 40.0),
        ],
    )
    .expect("valid matrix");
    world.network.replace(Some((matrix, StationTable::new())));
    world.tour.replace(Some(Tour::round_trip(a, [b, c])));
}

#[given("a 500 km leg without stations")]
fn given_unreachable_leg(world: &ScheduleWorld) {
    let a = LocationId::city("A");
    let b = LocationId::city("B");
    let matrix = matrix_from_pairs(&[a.clone(), b.clone()], &[(a, b, 500.0)])
        .expect("valid matrix");
    world.network.replace(Some((matrix, StationTable::new())));
    world.tour.replace(Some(one_way("A", "B")));
}

#[given("the time-optimal strategy")]
fn given_time_optimal(world: &ScheduleWorld) {
    world.strategy.replace(Strategy::TimeOptimal);
}

#[given("the cost-optimal strategy")]
fn given_cost_optimal(world: &ScheduleWorld) {
    world.strategy.replace(Strategy::CostOptimal);
}

#[when("the round trip from Ingolstadt via Halle is scheduled")]
fn when_round_trip(world: &ScheduleWorld) {
    world.schedule();
}

#[when("the round trip departing at 08:00 is scheduled")]
fn when_round_trip_at_eight(world: &ScheduleWorld) {
    world.schedule();
}

#[when("the one-way trip is scheduled")]
fn when_one_way(world: &ScheduleWorld) {
    world.schedule();
}

#[then(
    "the plan actions are start, drive_to_charger, charging, drive_to_stop, drive_to_charger, charging, drive_to_stop"
)]
fn then_time_optimal_actions(world: &ScheduleWorld) {
    let actions: Vec<StepKind> = world.plan().iter().map(|step| step.kind).collect();
    assert_eq!(
        actions,
        vec![
            StepKind::Start,
            StepKind::DriveToCharger,
            StepKind::Charging,
            StepKind::DriveToStop,
            StepKind::DriveToCharger,
            StepKind::Charging,
            StepKind::DriveToStop,
        ]
    );
}

#[then("every charging step uses StationB")]
fn then_all_station_b(world: &ScheduleWorld) {
    assert_eq!(world.charging_stations(), vec!["StationB", "StationB"]);
}

#[then("the first charging step uses StationA")]
fn then_first_station_a(world: &ScheduleWorld) {
    assert_eq!(
        world.charging_stations().first().map(String::as_str),
        Some("StationA")
    );
}

#[then("no station is charged at twice before reaching a stop")]
fn then_no_cycles(world: &ScheduleWorld) {
    let mut seen = BTreeSet::new();
    for step in world.plan() {
        match step.kind {
            StepKind::Charging => {
                assert!(
                    seen.insert(step.to.clone()),
                    "station {} reused within one leg",
                    step.to
                );
            }
            StepKind::DriveToStop => seen.clear(),
            StepKind::Start | StepKind::DriveToCharger => {}
        }
    }
}

#[then("the truck returns with 140 kWh")]
fn then_returns_with_140(world: &ScheduleWorld) {
    assert!((world.final_soc() - 140.0).abs() < 1e-6);
}

#[then("the truck arrives with 200 kWh")]
fn then_arrives_with_200(world: &ScheduleWorld) {
    assert!((world.final_soc() - 200.0).abs() < 1e-6);
}

#[then("the plan contains 2 charging steps")]
fn then_two_charges(world: &ScheduleWorld) {
    assert_eq!(world.charging_stations(), vec!["S1", "S2"]);
}

#[then("the plan contains 0 charging steps")]
fn then_no_charges(world: &ScheduleWorld) {
    assert!(world.charging_stations().is_empty());
    assert_eq!(world.drive_to_stop_steps().len(), 2);
}

#[then("the outbound leg ends at 09:15")]
fn then_outbound_end(world: &ScheduleWorld) {
    let legs = world.drive_to_stop_steps();
    assert_eq!(legs.first().map(|step| hh_mm(step.end)), Some((9, 15)));
}

#[then("the return leg starts at 10:00 after the dwell")]
fn then_return_start(world: &ScheduleWorld) {
    let legs = world.drive_to_stop_steps();
    assert_eq!(legs.get(1).map(|step| hh_mm(step.start)), Some((10, 0)));
}

#[then("the truck returns at 11:15")]
fn then_return_end(world: &ScheduleWorld) {
    let legs = world.drive_to_stop_steps();
    assert_eq!(legs.last().map(|step| hh_mm(step.end)), Some((11, 15)));
}

#[then("each leg after a stop departs 45 minutes after the previous arrival")]
fn then_dwell_between_legs(world: &ScheduleWorld) {
    let legs = world.drive_to_stop_steps();
    assert_eq!(legs.len(), 3);
    for pair in legs.windows(2) {
        if let [arrival, departure] = pair {
            assert_eq!(departure.start - arrival.end, TimeDelta::minutes(45));
        }
    }
}

#[then("the run ends at 11:00 when the truck reaches the origin")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_no_trailing_dwell(world: &ScheduleWorld) {
    let state = world
        .outcome
        .borrow()
        .clone()
        .expect("schedule should run before assertions")
        .expect("schedule should succeed");
    let last = state.plan().last().expect("non-empty plan").clone();
    assert_eq!(last.kind, StepKind::DriveToStop);
    assert_eq!(last.to, LocationId::city("A"));
    assert_eq!(hh_mm(last.end), (11, 0));
    assert_eq!(state.time(), last.end);
}

#[then("scheduling fails because the route is infeasible")]
#[expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]
fn then_infeasible(world: &ScheduleWorld) {
    let err = world
        .outcome
        .borrow()
        .clone()
        .expect("schedule should run before assertions")
        .expect_err("expected an infeasible route");
    assert!(matches!(err, ScheduleError::InfeasibleRoute { .. }));
}

#[scenario(path = "tests/features/schedule_engine.feature", index = 0)]
fn time_optimal_round_trip(world: ScheduleWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/schedule_engine.feature", index = 1)]
fn cost_optimal_round_trip(world: ScheduleWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/schedule_engine.feature", index = 2)]
fn chained_charging_on_long_leg(world: ScheduleWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/schedule_engine.feature", index = 3)]
fn short_round_trip_without_charging(world: ScheduleWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/schedule_engine.feature", index = 4)]
fn unreachable_leg_is_infeasible(world: ScheduleWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/schedule_engine.feature", index = 5)]
fn dwell_skips_the_final_location(world: ScheduleWorld) {
    let _ = world;
}
