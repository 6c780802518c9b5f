//! Fixed visiting order consumed by the engine.

use voltway_core::LocationId;

use crate::ScheduleError;

/// Ordered locations a truck visits. The engine never reorders them.
///
/// # Examples
/// ```
/// use voltway_core::LocationId;
/// use voltway_scheduler::Tour;
///
/// let tour = Tour::round_trip(LocationId::city("Ingolstadt"), [LocationId::city("Halle")]);
/// let names: Vec<_> = tour.locations().iter().map(LocationId::as_str).collect();
/// assert_eq!(names, ["Ingolstadt", "Halle", "Ingolstadt"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tour {
    locations: Vec<LocationId>,
}

impl Tour {
    /// Use `locations` as given.
    ///
    /// # Errors
    /// Returns [`ScheduleError::EmptyTour`] with fewer than two locations.
    pub fn new(locations: Vec<LocationId>) -> Result<Self, ScheduleError> {
        if locations.len() < 2 {
            return Err(ScheduleError::EmptyTour {
                len: locations.len(),
            });
        }
        Ok(Self { locations })
    }

    /// Leave `origin`, visit `stops` in order and return to `origin`.
    pub fn round_trip<I>(origin: LocationId, stops: I) -> Self
    where
        I: IntoIterator<Item = LocationId>,
    {
        let mut locations = vec![origin.clone()];
        locations.extend(stops);
        locations.push(origin);
        Self { locations }
    }

    /// Locations in visiting order.
    #[must_use]
    pub fn locations(&self) -> &[LocationId] {
        &self.locations
    }

    /// First location.
    #[must_use]
    pub fn origin(&self) -> Option<&LocationId> {
        self.locations.first()
    }

    /// Number of legs.
    #[must_use]
    pub const fn leg_count(&self) -> usize {
        self.locations.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::empty(Vec::new())]
    #[case::single(vec![LocationId::city("Halle")])]
    fn short_tours_are_rejected(#[case] locations: Vec<LocationId>) {
        let len = locations.len();
        assert_eq!(Tour::new(locations), Err(ScheduleError::EmptyTour { len }));
    }

    #[rstest]
    fn round_trip_returns_to_origin() {
        let origin = LocationId::city("Ingolstadt");
        let tour = Tour::round_trip(
            origin.clone(),
            [LocationId::city("Halle"), LocationId::city("Leipzig")],
        );

        assert_eq!(tour.leg_count(), 3);
        assert_eq!(tour.origin(), Some(&origin));
        assert_eq!(tour.locations().last(), Some(&origin));
    }
}
