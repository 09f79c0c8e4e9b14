//! Error types shared by the environment store, comfort engine, metrics and I/O.
//!
//! All variants describe logic or configuration faults. Nothing here is
//! transient, so callers propagate rather than retry.

use thiserror::Error;

use crate::domain::GridShape;

pub type Result<T> = std::result::Result<T, ComfortError>;

#[derive(Debug, Error)]
pub enum ComfortError {
    #[error("Shape mismatch for '{name}': expected {expected}, found {found}")]
    ShapeMismatch {
        name: String,
        expected: GridShape,
        found: GridShape,
    },

    #[error("Parameter not found: {0}")]
    KeyNotFound(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("No comfort prediction has been computed yet")]
    NotComputed,

    #[error("Comfort index not implemented: {0}")]
    NotImplemented(String),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid band: lower limit {lower} must be below upper limit {upper}")]
    InvalidBand { lower: f64, upper: f64 },

    #[error("Cannot reduce over an empty {0} axis")]
    EmptyGrid(&'static str),

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ComfortError {
    /// Whether the failure should abort the surrounding pipeline.
    ///
    /// Only an unknown export tag is skippable; everything else aborts the
    /// requested operation.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ComfortError::UnsupportedFormat(_))
    }
}
