//! Choosing a charging station reachable on the remaining charge.

use std::collections::BTreeSet;

use voltway_core::{ChargingStation, DistanceMatrix, LocationId, StationId, StationTable};

use crate::{ScheduleError, StationRanking, Strategy};

/// A reachable station together with its distance from the current
/// position.
///
/// Candidates live only for the duration of one selection call; the
/// distance is never written back to the station table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    /// The station.
    pub station: &'a ChargingStation,
    /// Distance from the current position in kilometres.
    pub distance_km: f64,
}

/// Picks charging stations by reachability and a ranking policy.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use voltway_core::LocationId;
/// use voltway_core::test_support::{matrix_from_pairs, sample_truck, station};
/// use voltway_scheduler::{StationSelector, Strategy};
///
/// let depot = LocationId::city("Depot");
/// let slow = station("slow", 48.0, 11.0, 150.0, 0.30);
/// let fast = station("fast", 48.1, 11.1, 350.0, 0.40);
/// let matrix = matrix_from_pairs(
///     &[depot.clone(), slow.location_id(), fast.location_id()],
///     &[
///         (depot.clone(), slow.location_id(), 20.0),
///         (depot.clone(), fast.location_id(), 30.0),
///         (slow.location_id(), fast.location_id(), 10.0),
///     ],
/// )
/// .expect("valid matrix");
/// let stations = [slow, fast].into_iter().collect();
///
/// let selector = StationSelector::new(&matrix, &stations, &sample_truck(), Strategy::TimeOptimal);
/// let pick = selector.pick(&depot, 100.0, &BTreeSet::new()).expect("reachable");
/// assert_eq!(pick.station.id.as_str(), "fast");
/// ```
pub struct StationSelector<'a> {
    matrix: &'a DistanceMatrix,
    stations: &'a StationTable,
    consumption_kwh_per_km: f64,
    ranking: &'a dyn StationRanking,
}

impl<'a> StationSelector<'a> {
    /// Construct a selector for `truck` using a built-in strategy.
    #[must_use]
    pub fn new(
        matrix: &'a DistanceMatrix,
        stations: &'a StationTable,
        truck: &voltway_core::TruckSpec,
        strategy: Strategy,
    ) -> Self {
        Self::with_ranking(
            matrix,
            stations,
            truck.consumption_kwh_per_km(),
            strategy.ranking(),
        )
    }

    /// Construct a selector with an arbitrary ranking policy.
    #[must_use]
    pub const fn with_ranking(
        matrix: &'a DistanceMatrix,
        stations: &'a StationTable,
        consumption_kwh_per_km: f64,
        ranking: &'a dyn StationRanking,
    ) -> Self {
        Self {
            matrix,
            stations,
            consumption_kwh_per_km,
            ranking,
        }
    }

    /// Stations reachable from `from` on `soc_kwh`, in table order.
    ///
    /// A station is reachable when `0 < distance <= soc / consumption`; the
    /// station the truck currently stands at is never a candidate.
    ///
    /// # Errors
    /// Returns [`ScheduleError::Matrix`] when `from` or a station is missing
    /// from the matrix.
    #[expect(
        clippy::float_arithmetic,
        reason = "reach is remaining energy over consumption"
    )]
    pub fn candidates(
        &self,
        from: &LocationId,
        soc_kwh: f64,
        excluded: &BTreeSet<StationId>,
    ) -> Result<Vec<Candidate<'a>>, ScheduleError> {
        let reach_km = soc_kwh / self.consumption_kwh_per_km;
        let mut reachable = Vec::new();
        for station in self.stations.iter() {
            if excluded.contains(&station.id) {
                continue;
            }
            let distance_km = self.matrix.distance(from, &station.location_id())?;
            if distance_km > 0.0 && distance_km <= reach_km {
                reachable.push(Candidate {
                    station,
                    distance_km,
                });
            }
        }
        Ok(reachable)
    }

    /// Pick the preferred reachable station.
    ///
    /// Ties keep table order: the first of several equally ranked stations
    /// wins.
    ///
    /// # Errors
    /// Returns [`ScheduleError::InfeasibleRoute`] when nothing is reachable.
    pub fn pick(
        &self,
        from: &LocationId,
        soc_kwh: f64,
        excluded: &BTreeSet<StationId>,
    ) -> Result<Candidate<'a>, ScheduleError> {
        let chosen = self
            .candidates(from, soc_kwh, excluded)?
            .into_iter()
            .min_by(|a, b| self.ranking.compare(a.station, b.station))
            .ok_or_else(|| ScheduleError::InfeasibleRoute {
                location: from.clone(),
                soc_kwh,
            })?;
        log::debug!(
            "{} picked station {} at {:.1} km from {from}",
            self.ranking.name(),
            chosen.station.id,
            chosen.distance_km
        );
        Ok(chosen)
    }
}
