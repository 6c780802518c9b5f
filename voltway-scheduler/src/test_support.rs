//! Fixtures for unit and behaviour tests.
//!
//! Compiled unconditionally and hidden from the documentation.

use std::cell::RefCell;

use chrono::{NaiveDate, NaiveDateTime};
use voltway_core::test_support::{matrix_from_pairs, station};
use voltway_core::{DistanceMatrix, LocationId, StationTable};

use crate::{GeometryError, RouteGeometry, RouteGeometryProvider, RoutePoint};

/// `2025-01-01` at `hour:minute`.
///
/// # Panics
/// Panics for an invalid wall-clock time.
#[must_use]
pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    match NaiveDate::from_ymd_opt(2025, 1, 1).and_then(|date| date.and_hms_opt(hour, minute, 0)) {
        Some(time) => time,
        None => panic!("invalid fixture time {hour}:{minute}"),
    }
}

/// The Ingolstadt/Halle network with two stations.
///
/// `StationA` offers 150 kW at 0.30 per kWh, `StationB` 350 kW at 0.40.
/// Distances: Ingolstadt-Halle 300, Ingolstadt-A 50, Ingolstadt-B 150,
/// Halle-A 250, Halle-B 100, A-B 120.
///
/// # Panics
/// Never in practice; the distances are fixed and valid.
#[must_use]
pub fn ingolstadt_halle_network() -> (DistanceMatrix, StationTable) {
    let a = station("StationA", 48.5, 11.5, 150.0, 0.30);
    let b = station("StationB", 49.0, 11.0, 350.0, 0.40);
    let ingolstadt = LocationId::city("Ingolstadt");
    let halle = LocationId::city("Halle");
    let matrix = matrix_from_pairs(
        &[ingolstadt.clone(), halle.clone(), a.location_id(), b.location_id()],
        &[
            (ingolstadt.clone(), halle.clone(), 300.0),
            (ingolstadt.clone(), a.location_id(), 50.0),
            (ingolstadt, b.location_id(), 150.0),
            (halle.clone(), a.location_id(), 250.0),
            (halle, b.location_id(), 100.0),
            (a.location_id(), b.location_id(), 120.0),
        ],
    );
    match matrix {
        Ok(matrix) => (matrix, [a, b].into_iter().collect()),
        Err(err) => panic!("fixture matrix is valid: {err}"),
    }
}

/// A [`RouteGeometryProvider`] returning the same geometry for every call
/// and recording the requested segments.
#[derive(Debug, Default)]
pub struct FixedGeometryProvider {
    length_meters: f64,
    travel_time_seconds: f64,
    calls: RefCell<Vec<(RoutePoint, RoutePoint)>>,
}

impl FixedGeometryProvider {
    /// Answer every segment with `length_meters` and `travel_time_seconds`.
    #[must_use]
    pub const fn new(length_meters: f64, travel_time_seconds: f64) -> Self {
        Self {
            length_meters,
            travel_time_seconds,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Segments requested so far.
    #[must_use]
    pub fn calls(&self) -> Vec<(RoutePoint, RoutePoint)> {
        self.calls.borrow().clone()
    }
}

impl RouteGeometryProvider for FixedGeometryProvider {
    fn route_between(
        &self,
        from: RoutePoint,
        to: RoutePoint,
    ) -> Result<RouteGeometry, GeometryError> {
        self.calls.borrow_mut().push((from, to));
        Ok(RouteGeometry {
            length_meters: self.length_meters,
            travel_time_seconds: self.travel_time_seconds,
            points: vec![from, to],
        })
    }
}

/// A [`RouteGeometryProvider`] that never finds a route.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnroutableGeometryProvider;

impl RouteGeometryProvider for UnroutableGeometryProvider {
    fn route_between(
        &self,
        from: RoutePoint,
        to: RoutePoint,
    ) -> Result<RouteGeometry, GeometryError> {
        Err(GeometryError::NoRoute {
            from: format!("{},{}", from.latitude, from.longitude),
            to: format!("{},{}", to.latitude, to.longitude),
        })
    }
}
