//! # Error Module
//!
//! The crate's single error type. Routine absence (an unloaded chunk, an
//! out-of-range coordinate, a missing neighbor) is never reported through
//! here; those cases degrade to the empty block or a `false` result.

use thiserror::Error;

/// Errors raised while decoding persisted data or loading configuration.
#[derive(Error, Debug)]
pub enum VoxelError {
    /// A serialized chunk whose block array is not exactly one chunk volume long.
    #[error("serialized chunk holds {actual} blocks, expected {expected}")]
    InvalidBlockCount {
        /// The chunk volume (S³).
        expected: usize,
        /// The length that was actually supplied.
        actual: usize,
    },

    /// JSON input for a chunk, configuration, or material table was malformed.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration or material file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration value violates one of its invariants.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A material colour string could not be parsed.
    #[error("invalid colour \"{0}\", expected #RRGGBB")]
    InvalidColor(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VoxelError>;
