//! Energy-aware tour scheduling for battery-electric trucks.
//!
//! Given a fixed [`Tour`], a [`DistanceMatrix`](voltway_core::DistanceMatrix)
//! and a pruned station table, [`ScheduleEngine`] simulates the truck's
//! battery leg by leg. Whenever a leg would end below the reserve it detours
//! to a station chosen by [`StationSelector`] and charges to the ceiling.
//! The resulting plan converts into a display route with [`to_route`] and
//! can be decorated with road geometry through [`enrich_route`].
//!
//! The only emergent failure is [`ScheduleError::InfeasibleRoute`]: no
//! station is reachable on the remaining charge. It aborts the run; retrying
//! with another strategy is the caller's decision.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod engine;
mod enrich;
mod error;
mod leg;
mod plan;
mod planner;
mod policy;
mod route;
mod selector;
mod state;
mod strategy;
mod summary;
mod tour;

#[doc(hidden)]
pub mod test_support;

pub use engine::{ScheduleEngine, compute_schedule};
pub use enrich::{RouteGeometry, RouteGeometryProvider, enrich_route};
pub use error::{GeometryError, PlanningError, ScheduleError};
pub use leg::{Leg, LegModel};
pub use plan::{PlanStep, StepKind};
pub use planner::{PlanRequest, PlannedRoute, build_matrix_and_stations, plan_route};
pub use policy::SchedulePolicy;
pub use route::{RoutePoint, RouteResponse, RouteStep, to_route};
pub use selector::{Candidate, StationSelector};
pub use state::TruckState;
pub use strategy::{CheapestEnergy, FastestCharger, StationRanking, Strategy, UnknownStrategy};
pub use summary::ScheduleSummary;
pub use tour::Tour;
