//! Charging stations and radius-based pre-filtering.
//!
//! The station table is reference data shared between scheduling runs. Each
//! run filters its own working copy with [`filter_within_radius`], bounding
//! the distance matrix to stations the truck could plausibly reach.

use geo::Coord;
use thiserror::Error;

use crate::{Location, LocationId, StationId, distance_km};

/// A charger a truck may detour to.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use voltway_core::{ChargingStation, StationId};
///
/// # fn main() -> Result<(), voltway_core::StationError> {
/// let station = ChargingStation::new(
///     StationId::new("17"),
///     Coord { x: 11.5, y: 48.5 },
///     350.0,
///     0.40,
/// )?;
/// assert_eq!(station.max_power_kw, 350.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargingStation {
    /// Identifier from the station table.
    pub id: StationId,
    /// Position with `x = longitude` and `y = latitude`.
    pub position: Coord<f64>,
    /// Maximum charging power in kW.
    pub max_power_kw: f64,
    /// Energy price per kWh.
    pub price_per_kwh: f64,
}

/// Errors returned by [`ChargingStation::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StationError {
    /// Latitude or longitude was outside the WGS84 range or not finite.
    #[error("station {id} has invalid coordinates ({latitude}, {longitude})")]
    InvalidCoordinates {
        /// Station identifier.
        id: StationId,
        /// Supplied latitude.
        latitude: f64,
        /// Supplied longitude.
        longitude: f64,
    },
    /// Charging power was zero, negative or not finite.
    #[error("station {id} has non-positive charging power {max_power_kw} kW")]
    InvalidPower {
        /// Station identifier.
        id: StationId,
        /// Supplied power.
        max_power_kw: f64,
    },
    /// Energy price was negative or not finite.
    #[error("station {id} has invalid energy price {price_per_kwh}")]
    InvalidPrice {
        /// Station identifier.
        id: StationId,
        /// Supplied price.
        price_per_kwh: f64,
    },
}

impl ChargingStation {
    /// Validate and construct a [`ChargingStation`].
    ///
    /// # Errors
    /// Returns [`StationError`] when coordinates, power or price are unusable
    /// for scheduling.
    pub fn new(
        id: StationId,
        position: Coord<f64>,
        max_power_kw: f64,
        price_per_kwh: f64,
    ) -> Result<Self, StationError> {
        if !valid_position(position) {
            return Err(StationError::InvalidCoordinates {
                id,
                latitude: position.y,
                longitude: position.x,
            });
        }
        if !max_power_kw.is_finite() || max_power_kw <= 0.0 {
            return Err(StationError::InvalidPower { id, max_power_kw });
        }
        if !price_per_kwh.is_finite() || price_per_kwh < 0.0 {
            return Err(StationError::InvalidPrice { id, price_per_kwh });
        }
        Ok(Self {
            id,
            position,
            max_power_kw,
            price_per_kwh,
        })
    }

    /// Matrix key for this station.
    #[must_use]
    pub fn location_id(&self) -> LocationId {
        LocationId::Station(self.id.clone())
    }

    /// The station as a matrix [`Location`].
    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(self.location_id(), self.position)
    }
}

/// Return `true` when `position` is a finite WGS84 coordinate.
#[must_use]
pub fn valid_position(position: Coord<f64>) -> bool {
    position.x.is_finite()
        && position.y.is_finite()
        && (-180.0..=180.0).contains(&position.x)
        && (-90.0..=90.0).contains(&position.y)
}

/// Ordered collection of charging stations.
///
/// Iteration order is the insertion order, which the selector relies on to
/// break ties reproducibly.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StationTable {
    stations: Vec<ChargingStation>,
}

impl StationTable {
    /// Construct an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stations: Vec::new(),
        }
    }

    /// Append a station, keeping insertion order.
    pub fn push(&mut self, station: ChargingStation) {
        self.stations.push(station);
    }

    /// Look up a station by its raw identifier text.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ChargingStation> {
        self.stations.iter().find(|station| station.id.as_str() == id)
    }

    /// Return `true` when a station with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &StationId) -> bool {
        self.stations.iter().any(|station| &station.id == id)
    }

    /// Iterate over stations in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChargingStation> {
        self.stations.iter()
    }

    /// Borrow the stations as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[ChargingStation] {
        &self.stations
    }

    /// Number of stations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.stations.len()
    }

    /// Return `true` when the table holds no stations.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Return a new table restricted to stations within `max_distance_km` of
    /// any reference point.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use voltway_core::{ChargingStation, StationId, StationTable};
    ///
    /// # fn main() -> Result<(), voltway_core::StationError> {
    /// let near = ChargingStation::new(StationId::new("1"), Coord { x: 11.4, y: 48.8 }, 150.0, 0.3)?;
    /// let far = ChargingStation::new(StationId::new("2"), Coord { x: 13.4, y: 52.5 }, 150.0, 0.3)?;
    /// let table: StationTable = [near, far].into_iter().collect();
    ///
    /// let filtered = table.within_radius(&[Coord { x: 11.421, y: 48.766 }], 50.0);
    /// assert_eq!(filtered.len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn within_radius(&self, reference_points: &[Coord<f64>], max_distance_km: f64) -> Self {
        filter_within_radius(reference_points, &self.stations, max_distance_km)
            .into_iter()
            .collect()
    }
}

impl FromIterator<ChargingStation> for StationTable {
    fn from_iter<I: IntoIterator<Item = ChargingStation>>(iter: I) -> Self {
        Self {
            stations: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for StationTable {
    type Item = ChargingStation;
    type IntoIter = std::vec::IntoIter<ChargingStation>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.into_iter()
    }
}

impl<'a> IntoIterator for &'a StationTable {
    type Item = &'a ChargingStation;
    type IntoIter = std::slice::Iter<'a, ChargingStation>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}

/// Keep stations whose distance to any reference point is at most
/// `max_distance_km`.
///
/// The output preserves input order and lists each matching station once,
/// however many reference points it is close to. An empty reference set
/// yields an empty result.
#[must_use]
pub fn filter_within_radius(
    reference_points: &[Coord<f64>],
    stations: &[ChargingStation],
    max_distance_km: f64,
) -> Vec<ChargingStation> {
    let kept: Vec<ChargingStation> = stations
        .iter()
        .filter(|station| {
            reference_points
                .iter()
                .any(|point| distance_km(*point, station.position) <= max_distance_km)
        })
        .cloned()
        .collect();
    log::debug!(
        "kept {} of {} stations within {max_distance_km:.1} km of {} reference points",
        kept.len(),
        stations.len(),
        reference_points.len()
    );
    kept
}
