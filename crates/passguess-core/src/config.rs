//! Estimator configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::EstimatorError;

/// A named regex for the regex recognizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegexSpec {
    pub name: String,
    pub pattern: String,
}

/// Estimator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Passwords longer than this many chars are truncated before matching
    pub max_password_length: usize,
    /// Year date distances are measured from (None = current year)
    pub reference_year: Option<i32>,
    /// Extra frequency list files, JSON `{"name": ["word", ...]}`
    pub frequency_lists: Vec<PathBuf>,
    /// Adjacency graph file replacing the built-in graphs
    pub adjacency_graphs: Option<PathBuf>,
    /// Include the compiled-in dictionaries
    pub use_builtin_dictionaries: bool,
    /// Regexes added next to the built-in `recent_year` one
    pub regexes: Vec<RegexSpec>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            max_password_length: 256,
            reference_year: None,
            frequency_lists: Vec::new(),
            adjacency_graphs: None,
            use_builtin_dictionaries: true,
            regexes: Vec::new(),
        }
    }
}

impl EstimatorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, EstimatorError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EstimatorError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| EstimatorError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}
