//! Errors raised while loading reference data.

use camino::Utf8PathBuf;
use thiserror::Error;
use voltway_core::{StationError, TruckSpecError};

/// Failure to load or validate reference data.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A requested city is not in the city table.
    #[error("unknown city {name:?}; choose one of the available cities")]
    UnknownCity {
        /// Name that failed to resolve.
        name: String,
    },
    /// The requested truck model is not in the catalogue.
    #[error("unknown truck model {model:?}")]
    UnknownTruckModel {
        /// Model name that failed to resolve.
        model: String,
    },
    /// A reference file could not be opened.
    #[error("failed to open {path}")]
    OpenFile {
        /// Path that failed to open.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A JSON reference file is malformed.
    #[error("failed to parse {path}")]
    ParseJson {
        /// Offending file.
        path: Utf8PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// The station CSV could not be read.
    #[error("failed to read stations from {path}")]
    ReadCsv {
        /// Offending file.
        path: Utf8PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
    /// A station row holds an unusable value.
    #[error("{path}:{line}: {reason}")]
    MalformedStation {
        /// Offending file.
        path: Utf8PathBuf,
        /// One-based line number of the row.
        line: u64,
        /// What is wrong with the row.
        reason: String,
    },
    /// A station row describes an invalid station.
    #[error("{path}:{line}: invalid station")]
    InvalidStation {
        /// Offending file.
        path: Utf8PathBuf,
        /// One-based line number of the row.
        line: u64,
        /// Validation failure.
        #[source]
        source: StationError,
    },
    /// A truck entry fails validation.
    #[error("invalid truck specification in {path}")]
    InvalidTruckSpec {
        /// Offending file.
        path: Utf8PathBuf,
        /// Validation failure.
        #[source]
        source: TruckSpecError,
    },
    /// The start time is not a valid `HH:MM` wall-clock time.
    #[error("invalid start time {value:?}; expected HH:MM")]
    InvalidStartTime {
        /// Rejected input.
        value: String,
    },
}
