//! Fixtures shared by unit and behaviour tests across the workspace.
//!
//! The module is compiled unconditionally but hidden from the documentation;
//! it carries no behaviour that production code depends on.

use geo::Coord;

use crate::{ChargingStation, DistanceMatrix, LocationId, MatrixError, StationId, TruckSpec};

/// A 400 kWh truck with a 320 kWh ceiling consuming 1.2 kWh/km.
///
/// # Panics
/// Never in practice; the figures are fixed and valid.
///
/// # Examples
/// ```
/// use voltway_core::test_support::sample_truck;
///
/// let truck = sample_truck();
/// assert_eq!(truck.battery_80_kwh(), 320.0);
/// ```
#[must_use]
pub fn sample_truck() -> TruckSpec {
    match TruckSpec::new("Mercedes eActros", 400.0, 320.0, 1.2) {
        Ok(truck) => truck,
        Err(err) => panic!("sample truck is valid: {err}"),
    }
}

/// Construct a station at `(latitude, longitude)`.
///
/// # Panics
/// Panics when the figures are rejected by [`ChargingStation::new`].
#[must_use]
pub fn station(id: &str, latitude: f64, longitude: f64, power_kw: f64, price: f64) -> ChargingStation {
    let position = Coord {
        x: longitude,
        y: latitude,
    };
    match ChargingStation::new(StationId::new(id), position, power_kw, price) {
        Ok(station) => station,
        Err(err) => panic!("fixture station is valid: {err}"),
    }
}

/// Build a matrix from explicit symmetric distances.
///
/// Every unordered pair of distinct `ids` must appear once in `pairs`;
/// missing pairs surface as [`MatrixError::InvalidDistance`].
///
/// # Errors
/// Propagates validation failures from [`DistanceMatrix::from_rows`].
///
/// # Examples
/// ```
/// use voltway_core::LocationId;
/// use voltway_core::test_support::matrix_from_pairs;
///
/// let a = LocationId::city("A");
/// let b = LocationId::city("B");
/// let matrix = matrix_from_pairs(&[a.clone(), b.clone()], &[(a.clone(), b.clone(), 500.0)])
///     .expect("valid matrix");
/// assert_eq!(matrix.distance(&b, &a), Ok(500.0));
/// ```
pub fn matrix_from_pairs(
    ids: &[LocationId],
    pairs: &[(LocationId, LocationId, f64)],
) -> Result<DistanceMatrix, MatrixError> {
    let position = |id: &LocationId| ids.iter().position(|candidate| candidate == id);
    let n = ids.len();
    let mut rows: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 0.0 } else { f64::NAN }).collect())
        .collect();
    for (from, to, km) in pairs {
        let (Some(i), Some(j)) = (position(from), position(to)) else {
            return Err(MatrixError::UnknownLocation {
                id: if position(from).is_none() {
                    from.clone()
                } else {
                    to.clone()
                },
            });
        };
        if let Some(cell) = rows.get_mut(i).and_then(|row| row.get_mut(j)) {
            *cell = *km;
        }
        if let Some(cell) = rows.get_mut(j).and_then(|row| row.get_mut(i)) {
            *cell = *km;
        }
    }
    DistanceMatrix::from_rows(ids.to_vec(), &rows)
}
