//! Named customer sites.

use std::collections::BTreeMap;

use geo::Coord;

use crate::{Location, LocationId};

/// Lookup table from city name to WGS84 position.
///
/// # Examples
/// ```
/// use voltway_core::CityTable;
///
/// let mut cities = CityTable::new();
/// cities.insert("Halle", 51.482, 11.966);
/// let halle = cities.location("Halle").expect("known city");
/// assert_eq!(halle.latitude(), 51.482);
/// assert!(cities.location("Leipzig").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CityTable {
    cities: BTreeMap<String, Coord<f64>>,
}

impl CityTable {
    /// Construct an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cities: BTreeMap::new(),
        }
    }

    /// Add or replace a city.
    pub fn insert(&mut self, name: impl Into<String>, latitude: f64, longitude: f64) {
        self.cities.insert(
            name.into(),
            Coord {
                x: longitude,
                y: latitude,
            },
        );
    }

    /// Position of `name`, if known.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Coord<f64>> {
        self.cities.get(name).copied()
    }

    /// Return `true` when `name` is in the table.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cities.contains_key(name)
    }

    /// The city as a matrix [`Location`], if known.
    #[must_use]
    pub fn location(&self, name: &str) -> Option<Location> {
        self.get(name)
            .map(|position| Location::new(LocationId::city(name), position))
    }

    /// Iterate over `(name, position)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Coord<f64>)> {
        self.cities
            .iter()
            .map(|(name, position)| (name.as_str(), *position))
    }

    /// Number of cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Return `true` when the table holds no cities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
