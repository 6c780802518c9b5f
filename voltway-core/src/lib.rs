//! Core domain types for the Voltway scheduler.
//!
//! The crate holds the reference data a scheduling run consumes: locations,
//! charging stations, truck specifications, and the great-circle distance
//! matrix built over them. Constructors validate their input and return
//! `Result` so malformed rows fail before any simulation starts.
//!
//! Coordinates use [`geo::Coord`] with `x = longitude` and `y = latitude`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod city;
mod geo_math;
mod location;
mod matrix;
mod station;
mod truck;

#[doc(hidden)]
pub mod test_support;

pub use city::CityTable;
pub use geo_math::{EARTH_RADIUS_KM, distance_km};
pub use location::{Location, LocationId, StationId};
pub use matrix::{DistanceMatrix, MatrixError};
pub use station::{ChargingStation, StationError, StationTable, filter_within_radius, valid_position};
pub use truck::{TruckCatalog, TruckSpec, TruckSpecError};
