//! Mapping a plan onto an externally consumable route.
//!
//! Each step is resolved to coordinates through the station table first
//! and the city table second. Aggregate distance and duration start at zero
//! and road geometry starts empty; [`enrich_route`](crate::enrich_route)
//! fills them in afterwards.

use serde::{Deserialize, Serialize};
use voltway_core::{CityTable, StationTable};

use crate::{PlanStep, StepKind};

/// A WGS84 point on a route polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// One displayed route entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Start time as `HH:MM`.
    pub time: String,
    /// Identifier of the location reached.
    pub location: String,
    /// Latitude when the location is known.
    pub latitude: Option<f64>,
    /// Longitude when the location is known.
    pub longitude: Option<f64>,
    /// Road geometry leading to this step.
    pub points: Vec<RoutePoint>,
    /// Action performed.
    pub action: StepKind,
    /// Whole minutes between the step's start and end.
    pub duration_minutes: i64,
    /// Charge after the step, rounded to whole kWh.
    pub soc: i64,
    /// Short explanation of the step.
    pub why: String,
}

impl RouteStep {
    /// Coordinates of the step when both are known.
    #[must_use]
    pub fn position(&self) -> Option<RoutePoint> {
        Some(RoutePoint {
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }
}

/// A route with placeholders for externally computed aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    /// Steps in plan order.
    pub route: Vec<RouteStep>,
    /// Road distance in kilometres, zero until enriched.
    pub total_distance_km: f64,
    /// Road driving time in hours, zero until enriched.
    pub total_duration_hours: f64,
}

fn explain(kind: StepKind, is_last: bool) -> &'static str {
    match kind {
        StepKind::Start => "Tour start",
        StepKind::DriveToCharger => "Remaining charge cannot cover the next leg above the reserve",
        StepKind::Charging => "Needed to charge to reach next destination",
        StepKind::DriveToStop if is_last => "Final destination",
        StepKind::DriveToStop => "Loading/unloading",
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "charge is displayed in whole kWh"
)]
fn whole_kwh(soc_kwh: f64) -> i64 {
    soc_kwh.round() as i64
}

/// Convert `plan` into a [`RouteResponse`].
///
/// Locations found in neither table keep `None` coordinates; this is not an
/// error.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use voltway_core::{CityTable, LocationId, StationTable};
/// use voltway_scheduler::{TruckState, to_route};
///
/// let mut cities = CityTable::new();
/// cities.insert("Ingolstadt", 48.766, 11.421);
/// let at = NaiveDate::from_ymd_opt(2025, 1, 1)
///     .and_then(|d| d.and_hms_opt(8, 0, 0))
///     .expect("valid time");
/// let state = TruckState::start(LocationId::city("Ingolstadt"), at, 319.6);
///
/// let route = to_route(state.plan(), &cities, &StationTable::new());
/// assert_eq!(route.route[0].time, "08:00");
/// assert_eq!(route.route[0].latitude, Some(48.766));
/// assert_eq!(route.route[0].soc, 320);
/// ```
#[must_use]
pub fn to_route(plan: &[PlanStep], cities: &CityTable, stations: &StationTable) -> RouteResponse {
    let last_index = plan.len().saturating_sub(1);
    let route = plan
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let key = step.to.as_str();
            let position = stations
                .get(key)
                .map(|station| station.position)
                .or_else(|| cities.get(key));
            if position.is_none() {
                log::warn!("no coordinates for location {key}");
            }
            RouteStep {
                time: step.start.format("%H:%M").to_string(),
                location: key.to_owned(),
                latitude: position.map(|coord| coord.y),
                longitude: position.map(|coord| coord.x),
                points: Vec::new(),
                action: step.kind,
                duration_minutes: (step.end - step.start).num_minutes(),
                soc: whole_kwh(step.soc_kwh),
                why: explain(step.kind, index == last_index).to_owned(),
            }
        })
        .collect();
    RouteResponse {
        route,
        total_distance_km: 0.0,
        total_duration_hours: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use rstest::{fixture, rstest};
    use voltway_core::LocationId;
    use voltway_core::test_support::station;

    #[fixture]
    fn eight_am() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 1)
            .and_then(|date| date.and_hms_opt(8, 0, 0))
            .expect("valid timestamp")
    }

    fn step(kind: StepKind, to: LocationId, start: NaiveDateTime, minutes: i64) -> PlanStep {
        PlanStep {
            kind,
            from: None,
            to,
            start,
            end: start + TimeDelta::seconds(minutes * 60 + 30),
            soc_kwh: 140.4,
            distance_km: None,
            cost: 0.0,
        }
    }

    #[rstest]
    fn station_table_wins_over_city_table(eight_am: NaiveDateTime) {
        let mut cities = CityTable::new();
        cities.insert("17", 1.0, 2.0);
        let stations: StationTable = [station("17", 49.0, 11.0, 350.0, 0.4)]
            .into_iter()
            .collect();

        let route = to_route(
            &[step(StepKind::Charging, LocationId::station("17"), eight_am, 30)],
            &cities,
            &stations,
        );

        let only = route.route.first().expect("one step");
        assert_eq!(only.latitude, Some(49.0));
        assert_eq!(only.longitude, Some(11.0));
        assert_eq!(only.duration_minutes, 30);
        assert_eq!(only.soc, 140);
    }

    #[rstest]
    fn unknown_locations_keep_empty_coordinates(eight_am: NaiveDateTime) {
        let route = to_route(
            &[step(StepKind::DriveToStop, LocationId::city("Atlantis"), eight_am, 10)],
            &CityTable::new(),
            &StationTable::new(),
        );
        let only = route.route.first().expect("one step");
        assert_eq!(only.position(), None);
        assert_eq!(only.location, "Atlantis");
        assert_eq!(only.why, "Final destination");
    }

    #[rstest]
    fn placeholders_start_empty(eight_am: NaiveDateTime) {
        let route = to_route(
            &[step(StepKind::Start, LocationId::city("A"), eight_am, 0)],
            &CityTable::new(),
            &StationTable::new(),
        );
        assert_eq!(route.total_distance_km, 0.0);
        assert_eq!(route.total_duration_hours, 0.0);
        assert!(route.route.iter().all(|entry| entry.points.is_empty()));
    }
}
