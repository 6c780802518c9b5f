//! Symmetric great-circle distance matrices keyed by location identifier.
//!
//! A matrix is built once per scheduling request over the tour locations and
//! the pre-filtered charging stations, then read by the selector and engine.

use std::collections::HashMap;

use thiserror::Error;

use crate::{ChargingStation, Location, LocationId, distance_km};

/// Errors raised while building or querying a [`DistanceMatrix`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    /// Fewer than two distinct locations were supplied.
    #[error("distance matrix needs at least two distinct locations, got {distinct}")]
    InvalidTopology {
        /// Number of distinct identifiers supplied.
        distinct: usize,
    },
    /// A lookup referenced an identifier absent from the matrix.
    #[error("location {id} is not part of the distance matrix")]
    UnknownLocation {
        /// Identifier that was looked up.
        id: LocationId,
    },
    /// A row in [`DistanceMatrix::from_rows`] had the wrong length.
    #[error("row {row} has {actual} entries, expected {expected}")]
    NotSquare {
        /// Offending row index.
        row: usize,
        /// Expected number of entries.
        expected: usize,
        /// Actual number of entries.
        actual: usize,
    },
    /// Two mirrored entries disagreed.
    #[error("distance {from} -> {to} differs from {to} -> {from}")]
    Asymmetric {
        /// Row identifier.
        from: LocationId,
        /// Column identifier.
        to: LocationId,
    },
    /// An entry was negative, not finite, or a non-zero diagonal.
    #[error("invalid distance {value} between {from} and {to}")]
    InvalidDistance {
        /// Row identifier.
        from: LocationId,
        /// Column identifier.
        to: LocationId,
        /// Offending value.
        value: f64,
    },
}

/// Square, symmetric matrix of distances in kilometres.
///
/// Rows and columns share one ordering: the order in which identifiers were
/// first supplied. Duplicate identifiers keep their first position.
///
/// # Examples
/// ```
/// use voltway_core::{DistanceMatrix, Location, LocationId};
///
/// # fn main() -> Result<(), voltway_core::MatrixError> {
/// let ingolstadt = Location::city("Ingolstadt", 48.766, 11.421);
/// let halle = Location::city("Halle", 51.482, 11.966);
/// let matrix = DistanceMatrix::build(&ingolstadt, &halle, &[])?;
///
/// let km = matrix.distance(&LocationId::city("Ingolstadt"), &LocationId::city("Halle"))?;
/// assert!((km - 304.0).abs() < 5.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    ids: Vec<LocationId>,
    index: HashMap<LocationId, usize>,
    distances: Vec<f64>,
}

impl DistanceMatrix {
    /// Build the matrix over `{origin, destination} ∪ stations`.
    ///
    /// # Errors
    /// Returns [`MatrixError::InvalidTopology`] when fewer than two distinct
    /// identifiers remain.
    pub fn build(
        origin: &Location,
        destination: &Location,
        stations: &[ChargingStation],
    ) -> Result<Self, MatrixError> {
        let locations = [origin.clone(), destination.clone()]
            .into_iter()
            .chain(stations.iter().map(ChargingStation::location));
        Self::from_locations(locations)
    }

    /// Build the matrix over every tour location plus `stations`.
    ///
    /// Use this for tours with intermediate stops, where legs between stops
    /// must be measurable too.
    ///
    /// # Errors
    /// Returns [`MatrixError::InvalidTopology`] when fewer than two distinct
    /// identifiers remain.
    pub fn build_for_tour(
        tour_locations: &[Location],
        stations: &[ChargingStation],
    ) -> Result<Self, MatrixError> {
        let locations = tour_locations
            .iter()
            .cloned()
            .chain(stations.iter().map(ChargingStation::location));
        Self::from_locations(locations)
    }

    /// Build the matrix from arbitrary locations with haversine distances.
    ///
    /// # Errors
    /// Returns [`MatrixError::InvalidTopology`] when fewer than two distinct
    /// identifiers remain.
    pub fn from_locations<I>(locations: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = Location>,
    {
        let mut ids = Vec::new();
        let mut index = HashMap::new();
        let mut positions = Vec::new();
        for location in locations {
            if index.contains_key(&location.id) {
                continue;
            }
            index.insert(location.id.clone(), ids.len());
            ids.push(location.id);
            positions.push(location.position);
        }
        if ids.len() < 2 {
            return Err(MatrixError::InvalidTopology { distinct: ids.len() });
        }

        let n = ids.len();
        let mut distances = vec![0.0; n * n];
        for (i, from) in positions.iter().enumerate() {
            for (j, to) in positions.iter().enumerate().skip(i + 1) {
                let km = distance_km(*from, *to);
                if let Some(cell) = distances.get_mut(i * n + j) {
                    *cell = km;
                }
                if let Some(cell) = distances.get_mut(j * n + i) {
                    *cell = km;
                }
            }
        }
        log::debug!("built {n}x{n} distance matrix");
        Ok(Self {
            ids,
            index,
            distances,
        })
    }

    /// Build a matrix from explicit rows, validating its shape.
    ///
    /// Rows follow the order of `ids`. The matrix must be square and
    /// symmetric, with a zero diagonal and finite, non-negative entries.
    ///
    /// # Errors
    /// Returns [`MatrixError`] describing the first violated property.
    pub fn from_rows(ids: Vec<LocationId>, rows: &[Vec<f64>]) -> Result<Self, MatrixError> {
        let mut index = HashMap::new();
        for (i, id) in ids.iter().enumerate() {
            index.entry(id.clone()).or_insert(i);
        }
        if index.len() < 2 || index.len() != ids.len() {
            return Err(MatrixError::InvalidTopology {
                distinct: index.len(),
            });
        }
        let n = ids.len();
        if rows.len() != n {
            return Err(MatrixError::NotSquare {
                row: rows.len(),
                expected: n,
                actual: 0,
            });
        }
        let mut distances = Vec::with_capacity(n * n);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != n {
                return Err(MatrixError::NotSquare {
                    row,
                    expected: n,
                    actual: values.len(),
                });
            }
            distances.extend_from_slice(values);
        }

        let matrix = Self {
            ids,
            index,
            distances,
        };
        matrix.validate()?;
        Ok(matrix)
    }

    fn validate(&self) -> Result<(), MatrixError> {
        for (i, from) in self.ids.iter().enumerate() {
            for (j, to) in self.ids.iter().enumerate() {
                let value = self.cell(i, j).unwrap_or(f64::NAN);
                let bad_diagonal = i == j && value != 0.0;
                if !value.is_finite() || value < 0.0 || bad_diagonal {
                    return Err(MatrixError::InvalidDistance {
                        from: from.clone(),
                        to: to.clone(),
                        value,
                    });
                }
                if j > i && self.cell(j, i) != Some(value) {
                    return Err(MatrixError::Asymmetric {
                        from: from.clone(),
                        to: to.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn cell(&self, row: usize, column: usize) -> Option<f64> {
        self.distances
            .get(row * self.ids.len() + column)
            .copied()
    }

    fn position(&self, id: &LocationId) -> Result<usize, MatrixError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| MatrixError::UnknownLocation { id: id.clone() })
    }

    /// Distance in kilometres between two identifiers.
    ///
    /// # Errors
    /// Returns [`MatrixError::UnknownLocation`] when either identifier is
    /// absent.
    pub fn distance(&self, from: &LocationId, to: &LocationId) -> Result<f64, MatrixError> {
        let row = self.position(from)?;
        let column = self.position(to)?;
        self.cell(row, column)
            .ok_or_else(|| MatrixError::UnknownLocation { id: to.clone() })
    }

    /// Identifiers in row order.
    #[must_use]
    pub fn ids(&self) -> &[LocationId] {
        &self.ids
    }

    /// Return `true` when `id` has a row in the matrix.
    #[must_use]
    pub fn contains(&self, id: &LocationId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of rows (and columns).
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Always `false` for a successfully built matrix.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
