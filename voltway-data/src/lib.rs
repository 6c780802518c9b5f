//! Reference data loading for the Voltway scheduler.
//!
//! Responsibilities:
//! - Read the city table, truck catalogue and charging station table from
//!   a data directory.
//! - Validate a scheduling request against the loaded tables.
//!
//! Boundaries:
//! - No scheduling rules live here (see `voltway-scheduler`).
//! - Files are read once per call; nothing is cached globally.

#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use voltway_core::{CityTable, StationTable, TruckCatalog, TruckSpec};

mod cities;
mod error;
pub mod fs;
mod stations;
mod trucks;

pub use cities::{load_cities, read_cities};
pub use error::LoadError;
pub use stations::{load_stations, read_stations};
pub use trucks::{load_trucks, read_trucks};

/// Default file name of the city table.
pub const CITIES_FILE: &str = "cities.json";
/// Default file name of the truck catalogue.
pub const TRUCKS_FILE: &str = "truck_specs.json";
/// Default file name of the charging station table.
pub const STATIONS_FILE: &str = "charge_points.csv";

/// Locations of the three reference files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    /// City table (`cities.json`).
    pub cities: Utf8PathBuf,
    /// Truck catalogue (`truck_specs.json`).
    pub trucks: Utf8PathBuf,
    /// Charging stations (`charge_points.csv`).
    pub stations: Utf8PathBuf,
}

impl DataPaths {
    /// Default file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Utf8Path) -> Self {
        Self {
            cities: dir.join(CITIES_FILE),
            trucks: dir.join(TRUCKS_FILE),
            stations: dir.join(STATIONS_FILE),
        }
    }
}

/// All reference tables needed to plan a tour.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    /// Known cities.
    pub cities: CityTable,
    /// Known truck models.
    pub trucks: TruckCatalog,
    /// Charging stations in file order.
    pub stations: StationTable,
}

impl ReferenceData {
    /// Load the default file names from `dir`.
    ///
    /// # Errors
    /// Returns the first [`LoadError`] raised by any of the loaders.
    pub fn load(dir: &Utf8Path) -> Result<Self, LoadError> {
        Self::load_paths(&DataPaths::in_dir(dir))
    }

    /// Load the tables from explicit paths.
    ///
    /// # Errors
    /// Returns the first [`LoadError`] raised by any of the loaders.
    pub fn load_paths(paths: &DataPaths) -> Result<Self, LoadError> {
        Ok(Self {
            cities: load_cities(&paths.cities)?,
            trucks: load_trucks(&paths.trucks)?,
            stations: load_stations(&paths.stations)?,
        })
    }

    /// Resolve a request against these tables.
    ///
    /// # Errors
    /// - [`LoadError::UnknownCity`] when the origin or a stop is not known.
    /// - [`LoadError::UnknownTruckModel`] when the model is not catalogued.
    /// - [`LoadError::InvalidStartTime`] when `start_time` is not `HH:MM`.
    pub fn validate<S: AsRef<str>>(
        &self,
        origin: &str,
        stops: &[S],
        truck_model: &str,
        start_time: &str,
        date: NaiveDate,
    ) -> Result<ValidatedRequest, LoadError> {
        for name in std::iter::once(origin).chain(stops.iter().map(AsRef::as_ref)) {
            if !self.cities.contains(name) {
                return Err(LoadError::UnknownCity {
                    name: name.to_owned(),
                });
            }
        }
        let truck = self
            .trucks
            .get(truck_model)
            .cloned()
            .ok_or_else(|| LoadError::UnknownTruckModel {
                model: truck_model.to_owned(),
            })?;
        Ok(ValidatedRequest {
            origin: origin.to_owned(),
            stops: stops.iter().map(|stop| stop.as_ref().to_owned()).collect(),
            truck,
            start_time: parse_start_time(start_time, date)?,
        })
    }
}

/// A request whose names resolved against the reference tables.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// Origin city.
    pub origin: String,
    /// Stops in visiting order.
    pub stops: Vec<String>,
    /// Truck performing the tour.
    pub truck: TruckSpec,
    /// Departure time.
    pub start_time: NaiveDateTime,
}

/// A validated request together with the tables it was checked against.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedRequest {
    /// The resolved request.
    pub request: ValidatedRequest,
    /// Reference tables for planning.
    pub data: ReferenceData,
}

/// Combine `date` with an `HH:MM` wall-clock time.
///
/// # Errors
/// Returns [`LoadError::InvalidStartTime`] when `value` is not a valid
/// `HH:MM` time.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use voltway_data::parse_start_time;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date");
/// let start = parse_start_time("07:30", date).expect("valid time");
/// assert_eq!(start.to_string(), "2025-03-14 07:30:00");
/// assert!(parse_start_time("7.30", date).is_err());
/// ```
pub fn parse_start_time(value: &str, date: NaiveDate) -> Result<NaiveDateTime, LoadError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|time| date.and_time(time))
        .map_err(|_| LoadError::InvalidStartTime {
            value: value.to_owned(),
        })
}

/// Load the reference data from `dir` and validate a request against it.
///
/// The returned request's start time combines `date` with `start_time`.
///
/// # Errors
/// Returns [`LoadError`] when a file fails to load or the request names an
/// unknown city or truck model, or carries a malformed start time.
pub fn validate_and_load<S: AsRef<str>>(
    dir: &Utf8Path,
    origin: &str,
    stops: &[S],
    truck_model: &str,
    start_time: &str,
    date: NaiveDate,
) -> Result<LoadedRequest, LoadError> {
    let data = ReferenceData::load(dir)?;
    let request = data.validate(origin, stops, truck_model, start_time, date)?;
    log::info!(
        "validated request from {} via {} stop(s) with {}",
        request.origin,
        request.stops.len(),
        request.truck.model()
    );
    Ok(LoadedRequest { request, data })
}
