//! Facade crate for the Voltway tour scheduler.
//!
//! This crate re-exports the core domain types and exposes the scheduler and
//! the reference data loader behind feature flags.

#![forbid(unsafe_code)]

pub use voltway_core::{
    ChargingStation, CityTable, DistanceMatrix, EARTH_RADIUS_KM, Location, LocationId,
    MatrixError, StationError, StationId, StationTable, TruckCatalog, TruckSpec, TruckSpecError,
    distance_km, filter_within_radius,
};

#[cfg(feature = "scheduler")]
pub use voltway_scheduler::{
    GeometryError, PlanRequest, PlanStep, PlannedRoute, PlanningError, RouteGeometry,
    RouteGeometryProvider, RoutePoint, RouteResponse, RouteStep, ScheduleEngine, ScheduleError,
    SchedulePolicy, ScheduleSummary, StepKind, Strategy, Tour, TruckState,
    build_matrix_and_stations, compute_schedule, enrich_route, plan_route, to_route,
};

#[cfg(feature = "data")]
pub use voltway_data::{LoadError, LoadedRequest, ReferenceData, validate_and_load};
