//! Truck catalogue loader.
//!
//! The file maps each model name to its battery figures:
//!
//! ```json
//! {
//!   "Mercedes eActros": {
//!     "Battery_capacity_kWh": 400,
//!     "Battery_capacity_80%_kWh": 320,
//!     "Consumption_rate_kWh_per_km": 1.2,
//!     "Max_range_km": 333,
//!     "Range_80%_km": 266
//!   }
//! }
//! ```
//!
//! Declared ranges are informational; the scheduler derives ranges from the
//! battery figures and a mismatch is only logged.

use std::collections::BTreeMap;
use std::io::{BufReader, Read};

use camino::Utf8Path;
use serde::Deserialize;
use voltway_core::{TruckCatalog, TruckSpec};

use crate::LoadError;
use crate::fs::open_utf8_file;

/// Relative difference tolerated between declared and derived ranges.
const RANGE_TOLERANCE: f64 = 0.02;

#[derive(Debug, Deserialize)]
struct TruckRecord {
    #[serde(rename = "Battery_capacity_kWh")]
    battery_capacity_kwh: f64,
    #[serde(rename = "Battery_capacity_80%_kWh")]
    battery_80_kwh: f64,
    #[serde(rename = "Consumption_rate_kWh_per_km")]
    consumption_kwh_per_km: f64,
    #[serde(rename = "Max_range_km", default)]
    max_range_km: Option<f64>,
    #[serde(rename = "Range_80%_km", default)]
    range_80_km: Option<f64>,
}

fn check_declared_range(model: &str, label: &str, declared: Option<f64>, derived: f64) {
    let Some(declared) = declared else {
        return;
    };
    if derived > 0.0 && ((declared - derived) / derived).abs() > RANGE_TOLERANCE {
        log::warn!(
            "truck {model}: declared {label} {declared} km differs from derived {derived:.1} km"
        );
    }
}

/// Parse a truck catalogue from `reader`; `path` is used for error reporting.
///
/// # Errors
/// Returns [`LoadError::ParseJson`] for malformed JSON or missing keys and
/// [`LoadError::InvalidTruckSpec`] when figures fail validation.
pub fn read_trucks<R: Read>(reader: R, path: &Utf8Path) -> Result<TruckCatalog, LoadError> {
    let raw: BTreeMap<String, TruckRecord> =
        serde_json::from_reader(reader).map_err(|source| LoadError::ParseJson {
            path: path.to_path_buf(),
            source,
        })?;
    let mut catalog = TruckCatalog::new();
    for (model, record) in raw {
        let spec = TruckSpec::new(
            model.as_str(),
            record.battery_capacity_kwh,
            record.battery_80_kwh,
            record.consumption_kwh_per_km,
        )
        .map_err(|source| LoadError::InvalidTruckSpec {
            path: path.to_path_buf(),
            source,
        })?;
        check_declared_range(&model, "max range", record.max_range_km, spec.max_range_km());
        check_declared_range(&model, "80% range", record.range_80_km, spec.range_80_km());
        catalog.insert(spec);
    }
    log::debug!("loaded {} truck models from {path}", catalog.len());
    Ok(catalog)
}

/// Load the truck catalogue stored at `path`.
///
/// # Errors
/// Returns [`LoadError::OpenFile`] or any error of [`read_trucks`].
pub fn load_trucks(path: &Utf8Path) -> Result<TruckCatalog, LoadError> {
    let file = open_utf8_file(path).map_err(|source| LoadError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    read_trucks(BufReader::new(file), path)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const CATALOGUE: &str = r#"{
        "Mercedes eActros": {
            "Battery_capacity_kWh": 400,
            "Battery_capacity_80%_kWh": 320,
            "Consumption_rate_kWh_per_km": 1.2,
            "Max_range_km": 333,
            "Range_80%_km": 266
        },
        "Volvo FH Electric": {
            "Battery_capacity_kWh": 540,
            "Battery_capacity_80%_kWh": 432,
            "Consumption_rate_kWh_per_km": 1.1
        }
    }"#;

    #[rstest]
    fn reads_every_model() {
        let catalog =
            read_trucks(CATALOGUE.as_bytes(), Utf8Path::new("truck_specs.json")).expect("valid");

        assert_eq!(catalog.len(), 2);
        let actros = catalog.get("Mercedes eActros").expect("model present");
        assert_eq!(actros.battery_capacity_kwh(), 400.0);
        assert_eq!(actros.battery_80_kwh(), 320.0);
        assert_eq!(actros.consumption_kwh_per_km(), 1.2);
    }

    #[rstest]
    fn missing_key_is_a_parse_error() {
        let json = r#"{"Broken": {"Battery_capacity_kWh": 400}}"#;
        let err = read_trucks(json.as_bytes(), Utf8Path::new("truck_specs.json"))
            .expect_err("incomplete record");
        assert!(matches!(err, LoadError::ParseJson { .. }));
    }

    #[rstest]
    fn ceiling_above_capacity_is_rejected() {
        let json = r#"{"Odd": {
            "Battery_capacity_kWh": 300,
            "Battery_capacity_80%_kWh": 320,
            "Consumption_rate_kWh_per_km": 1.2
        }}"#;
        let err = read_trucks(json.as_bytes(), Utf8Path::new("truck_specs.json"))
            .expect_err("invalid figures");
        assert!(matches!(err, LoadError::InvalidTruckSpec { .. }));
    }
}
