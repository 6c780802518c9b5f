//! City table loader.
//!
//! The file is a JSON object mapping each city name to `[latitude, longitude]`.

use std::collections::BTreeMap;
use std::io::{BufReader, Read};

use camino::Utf8Path;
use voltway_core::CityTable;

use crate::LoadError;
use crate::fs::open_utf8_file;

/// Parse a city table from `reader`; `path` is used for error reporting.
///
/// # Errors
/// Returns [`LoadError::ParseJson`] when the document is not a map of
/// coordinate pairs.
pub fn read_cities<R: Read>(reader: R, path: &Utf8Path) -> Result<CityTable, LoadError> {
    let raw: BTreeMap<String, [f64; 2]> =
        serde_json::from_reader(reader).map_err(|source| LoadError::ParseJson {
            path: path.to_path_buf(),
            source,
        })?;
    let mut cities = CityTable::new();
    for (name, [latitude, longitude]) in raw {
        cities.insert(name, latitude, longitude);
    }
    log::debug!("loaded {} cities from {path}", cities.len());
    Ok(cities)
}

/// Load the city table stored at `path`.
///
/// # Errors
/// Returns [`LoadError::OpenFile`] or [`LoadError::ParseJson`].
pub fn load_cities(path: &Utf8Path) -> Result<CityTable, LoadError> {
    let file = open_utf8_file(path).map_err(|source| LoadError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    read_cities(BufReader::new(file), path)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn parses_latitude_then_longitude() {
        let json = r#"{"Halle": [51.482, 11.966], "Ingolstadt": [48.766, 11.421]}"#;
        let cities = read_cities(json.as_bytes(), Utf8Path::new("cities.json")).expect("valid");

        assert_eq!(cities.len(), 2);
        let halle = cities.get("Halle").expect("Halle present");
        assert_eq!((halle.y, halle.x), (51.482, 11.966));
    }

    #[rstest]
    #[case::not_an_object("[1, 2]")]
    #[case::short_pair(r#"{"Halle": [51.482]}"#)]
    #[case::text_coordinate(r#"{"Halle": ["51.482", 11.966]}"#)]
    fn rejects_malformed_documents(#[case] json: &str) {
        let err = read_cities(json.as_bytes(), Utf8Path::new("cities.json"))
            .expect_err("malformed document");
        assert!(matches!(err, LoadError::ParseJson { .. }));
    }
}
