//! Error types for validation and incremental updates.
//!
//! Two disjoint taxonomies: [`ValidateError`] covers structural
//! problems detected before any output is produced (the whole encode
//! aborts), and [`UpdateError`] covers per-call misuse of the update
//! channel (only that call aborts). Neither is retryable.

use thiserror::Error;

/// Structural validation failures.
///
/// `part` is the human-readable label of the offending component,
/// e.g. `bar chart 'revenue'` or `sankey data`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidateError {
    #[error("data for {slot} not set for {part}")]
    MissingData { slot: String, part: String },

    #[error("duplicate node name '{name}' in {part}")]
    DuplicateNodeName { name: String, part: String },

    #[error("circular edge detected at node '{name}' in {part}")]
    CircularEdge { name: String, part: String },

    #[error("invalid edge '{from}' -> '{to}' in {part}: {reason}")]
    InvalidEdge {
        from: String,
        to: String,
        part: String,
        reason: String,
    },

    #[error("{axis} of {part} must be a category axis")]
    AxisTypeMismatch { axis: String, part: String },

    #[error("{part} is not plotted on any coordinate system")]
    NoCoordinateSystem { part: String },
}

/// Caller errors raised by the incremental update channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UpdateError {
    #[error("no data given to update")]
    EmptyData,

    #[error("null value at position {index}")]
    NullValue { index: usize },

    #[error("expected {expected} values, one per bound source, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    // The field cannot be called `source`: thiserror reserves that
    // name for the error cause.
    #[error("value at position {index} is not a valid {data_type} for source '{source_name}'")]
    TypeMismatch {
        index: usize,
        data_type: &'static str,
        source_name: String,
    },
}
