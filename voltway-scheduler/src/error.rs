//! Error types raised while scheduling, planning and enriching routes.

use thiserror::Error;
use voltway_core::{LocationId, MatrixError};

/// Errors raised by the selector and the schedule engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScheduleError {
    /// No charging station is reachable from the current position.
    ///
    /// This is terminal for the run; no partial plan is returned.
    #[error("infeasible route: no charging station reachable from {location} with {soc_kwh:.1} kWh")]
    InfeasibleRoute {
        /// Where the truck was stranded.
        location: LocationId,
        /// Charge left at that point.
        soc_kwh: f64,
    },
    /// A tour location has no row in the distance matrix.
    #[error("tour location {id} is not part of the distance matrix")]
    UnknownLocation {
        /// Missing identifier.
        id: LocationId,
    },
    /// A tour needs at least an origin and one further location.
    #[error("tour must contain at least two locations, got {len}")]
    EmptyTour {
        /// Number of locations supplied.
        len: usize,
    },
    /// A policy value was out of range.
    #[error("invalid schedule policy: {field} = {value}")]
    InvalidPolicy {
        /// Offending field.
        field: &'static str,
        /// Supplied value.
        value: f64,
    },
    /// A distance lookup failed.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// Errors raised by the planning pipeline that ties lookup, matrix
/// construction and scheduling together.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanningError {
    /// The origin or a stop is not in the city table.
    #[error("unknown location: {name}")]
    UnknownLocation {
        /// Name that was looked up.
        name: String,
    },
    /// No stops were requested.
    #[error("at least one stop is required")]
    NoStops,
    /// The distance matrix could not be built.
    #[error("failed to build distance matrix")]
    Matrix(#[source] MatrixError),
    /// Scheduling failed.
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Errors reported by a [`RouteGeometryProvider`](crate::RouteGeometryProvider).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The provider found no route between the points.
    #[error("no route found between {from} and {to}")]
    NoRoute {
        /// Origin as `latitude,longitude`.
        from: String,
        /// Destination as `latitude,longitude`.
        to: String,
    },
    /// The provider failed for another reason.
    #[error("routing provider error: {message}")]
    Provider {
        /// Human-readable description.
        message: String,
    },
}
