//! Errors raised while loading data assets

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read data asset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed JSON data asset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Adjacency graph '{0}' has no keys")]
    EmptyGraph(String),
    #[error("Adjacency graph '{graph}' key '{key}' has {found} slots (expected {expected})")]
    SlotCountMismatch {
        graph: String,
        key: char,
        found: usize,
        expected: usize,
    },
    #[error("Adjacency graph '{0}' uses {1} slots per key (valid: 6 or 8)")]
    UnsupportedSlotCount(String, usize),
    #[error("Adjacency graph '{graph}' key '{key}' is not a single character")]
    InvalidKey { graph: String, key: String },
    #[error("Layout for '{graph}' has misaligned key '{token}'")]
    MisalignedLayout { graph: String, token: String },
}
