//! Test helpers for composing reference data directories.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub(super) const CITIES: &str = r#"{"Ingolstadt": [48.766, 11.421], "Halle": [51.482, 11.966]}"#;

pub(super) const TRUCKS: &str = r#"{
    "Mercedes eActros": {
        "Battery_capacity_kWh": 400,
        "Battery_capacity_80%_kWh": 320,
        "Consumption_rate_kWh_per_km": 1.2
    }
}"#;

pub(super) const STATIONS: &str = "ID,latitude,longitude,max_power_kW,price_€/kWh,source\n\
                                   IN-1,48.80,11.45,150,0.30,operator\n\
                                   MID-1,50.10,11.70,350,0.45€,operator\n\
                                   HAL-1,51.45,12.00,50,0.25,roaming\n";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// A temporary directory populated with the default reference files.
pub(super) struct DataDir {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

impl DataDir {
    pub(super) fn empty() -> Self {
        let tmp = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
        Self { _tmp: tmp, root }
    }

    pub(super) fn complete() -> Self {
        let dir = Self::empty();
        write_utf8(&dir.root.join(voltway_data::CITIES_FILE), CITIES.as_bytes());
        write_utf8(&dir.root.join(voltway_data::TRUCKS_FILE), TRUCKS.as_bytes());
        write_utf8(&dir.root.join(voltway_data::STATIONS_FILE), STATIONS.as_bytes());
        dir
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }
}
