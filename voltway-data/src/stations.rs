//! Charging station table loader.
//!
//! The CSV carries a header row with at least the columns `ID`, `latitude`,
//! `longitude`, `max_power_kW` and `price_€/kWh`; further columns such as
//! `source` are ignored. Prices may keep a trailing or leading `€` sign.
//! Identifiers are kept exactly as written, so `00417` stays `00417`.

use std::collections::BTreeSet;
use std::io::{BufReader, Read};

use camino::Utf8Path;
use geo::Coord;
use serde::Deserialize;
use voltway_core::{ChargingStation, StationId, StationTable};

use crate::LoadError;
use crate::fs::open_utf8_file;

#[derive(Debug, Deserialize)]
struct StationRecord {
    #[serde(rename = "ID")]
    id: String,
    latitude: String,
    longitude: String,
    #[serde(rename = "max_power_kW")]
    max_power_kw: String,
    #[serde(rename = "price_€/kWh", alias = "price_per_kWh")]
    price: String,
}

struct RowContext<'a> {
    path: &'a Utf8Path,
    line: u64,
}

impl RowContext<'_> {
    fn malformed(&self, reason: String) -> LoadError {
        LoadError::MalformedStation {
            path: self.path.to_path_buf(),
            line: self.line,
            reason,
        }
    }

    fn number(&self, column: &str, raw: &str) -> Result<f64, LoadError> {
        raw.trim()
            .parse::<f64>()
            .map_err(|_| self.malformed(format!("{column} {raw:?} is not a number")))
    }

    fn price(&self, raw: &str) -> Result<f64, LoadError> {
        let cleaned = raw.replace('€', "");
        self.number("price", &cleaned)
    }
}

fn to_station(record: StationRecord, row: &RowContext<'_>) -> Result<ChargingStation, LoadError> {
    if record.id.is_empty() {
        return Err(row.malformed("station id is empty".to_owned()));
    }
    let latitude = row.number("latitude", &record.latitude)?;
    let longitude = row.number("longitude", &record.longitude)?;
    let max_power_kw = row.number("max_power_kW", &record.max_power_kw)?;
    let price_per_kwh = row.price(&record.price)?;
    ChargingStation::new(
        StationId::new(record.id),
        Coord {
            x: longitude,
            y: latitude,
        },
        max_power_kw,
        price_per_kwh,
    )
    .map_err(|source| LoadError::InvalidStation {
        path: row.path.to_path_buf(),
        line: row.line,
        source,
    })
}

/// Parse a station table from CSV `reader`; `path` is used for error
/// reporting.
///
/// Row order is preserved.
///
/// # Errors
/// - [`LoadError::ReadCsv`] when the CSV itself is unreadable or a required
///   column is missing.
/// - [`LoadError::MalformedStation`] for unparsable values and duplicate ids.
/// - [`LoadError::InvalidStation`] when a row fails station validation.
pub fn read_stations<R: Read>(reader: R, path: &Utf8Path) -> Result<StationTable, LoadError> {
    let csv_error = |source| LoadError::ReadCsv {
        path: path.to_path_buf(),
        source,
    };
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let headers = csv_reader.headers().map_err(csv_error)?.clone();

    let mut seen = BTreeSet::new();
    let mut stations = StationTable::new();
    for result in csv_reader.records() {
        let record = result.map_err(csv_error)?;
        let row = RowContext {
            path,
            line: record.position().map_or(0, csv::Position::line),
        };
        let parsed: StationRecord = record.deserialize(Some(&headers)).map_err(csv_error)?;
        if !seen.insert(parsed.id.clone()) {
            return Err(row.malformed(format!("duplicate station id {:?}", parsed.id)));
        }
        stations.push(to_station(parsed, &row)?);
    }
    log::debug!("loaded {} charging stations from {path}", stations.len());
    Ok(stations)
}

/// Load the station table stored at `path`.
///
/// # Errors
/// Returns [`LoadError::OpenFile`] or any error of [`read_stations`].
pub fn load_stations(path: &Utf8Path) -> Result<StationTable, LoadError> {
    let file = open_utf8_file(path).map_err(|source| LoadError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    read_stations(BufReader::new(file), path)
}
