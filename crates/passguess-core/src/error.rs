//! Estimator construction errors

use std::path::PathBuf;

use passguess_data::DataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EstimatorError {
    #[error("Failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid estimator config: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("Failed to load {path}: {source}")]
    DataFile { path: PathBuf, source: DataError },
    #[error(transparent)]
    Data(#[from] DataError),
    #[error("Invalid regex '{name}': {source}")]
    InvalidRegex {
        name: String,
        source: regex::Error,
    },
}
