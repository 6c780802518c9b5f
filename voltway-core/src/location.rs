//! Identifiers and positions for tour locations.
//!
//! A tour visits two kinds of places: named customer sites (cities) and
//! charging stations. Both are addressed through [`LocationId`], which keeps
//! the original identifier text untouched so station ids such as `"00417"`
//! survive loading and matrix construction verbatim.

use std::fmt;

use geo::Coord;

/// Opaque identifier of a charging station.
///
/// The raw text from the station table is stored as-is; numeric-looking ids
/// are never re-parsed or reformatted.
///
/// # Examples
/// ```
/// use voltway_core::StationId;
///
/// let id = StationId::new("00417");
/// assert_eq!(id.as_str(), "00417");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StationId(String);

impl StationId {
    /// Wrap a raw station identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// Key addressing a row or column of the distance matrix.
///
/// # Examples
/// ```
/// use voltway_core::{LocationId, StationId};
///
/// let city = LocationId::city("Halle");
/// let station = LocationId::Station(StationId::new("17"));
/// assert_eq!(city.as_str(), "Halle");
/// assert_eq!(station.to_string(), "17");
/// assert!(station.is_station());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LocationId {
    /// A named customer site from the city table.
    City(String),
    /// A charging station from the station table.
    Station(StationId),
}

impl LocationId {
    /// Build a city identifier.
    pub fn city(name: impl Into<String>) -> Self {
        Self::City(name.into())
    }

    /// Build a station identifier.
    pub fn station(raw: impl Into<String>) -> Self {
        Self::Station(StationId::new(raw))
    }

    /// Borrow the identifier text regardless of kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::City(name) => name,
            Self::Station(id) => id.as_str(),
        }
    }

    /// Return `true` when the identifier names a charging station.
    #[must_use]
    pub const fn is_station(&self) -> bool {
        matches!(self, Self::Station(_))
    }

    /// Return the station id when this location is a charging station.
    #[must_use]
    pub const fn as_station(&self) -> Option<&StationId> {
        match self {
            Self::Station(id) => Some(id),
            Self::City(_) => None,
        }
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<StationId> for LocationId {
    fn from(id: StationId) -> Self {
        Self::Station(id)
    }
}

/// An identifier paired with its WGS84 position.
///
/// Coordinates are stored with `x = longitude` and `y = latitude`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Matrix key for the location.
    pub id: LocationId,
    /// Geographic position.
    pub position: Coord<f64>,
}

impl Location {
    /// Pair an identifier with a position.
    #[must_use]
    pub const fn new(id: LocationId, position: Coord<f64>) -> Self {
        Self { id, position }
    }

    /// Build a city location from latitude and longitude in degrees.
    ///
    /// # Examples
    /// ```
    /// use voltway_core::Location;
    ///
    /// let halle = Location::city("Halle", 51.482, 11.966);
    /// assert_eq!(halle.latitude(), 51.482);
    /// assert_eq!(halle.longitude(), 11.966);
    /// ```
    pub fn city(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self::new(
            LocationId::city(name),
            Coord {
                x: longitude,
                y: latitude,
            },
        )
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.position.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.position.x
    }
}
