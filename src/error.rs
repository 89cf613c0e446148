//! Error types
//!
//! Simulation itself never fails; everything here comes from the edges
//! (tuning files, word lists, and the host's text/texture collaborators).

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable balance data
#[derive(Error, Debug)]
pub enum TuningError {
    /// The JSON document could not be parsed into a [`crate::tuning::Tuning`]
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),

    /// A `[low, high)` range with nothing in it
    #[error("empty range for {field}: [{low}, {high})")]
    EmptyRange {
        field: &'static str,
        low: f32,
        high: f32,
    },

    /// A count or amount that must be at least one
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    /// A duration or speed that must be strictly positive
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
}

/// Failure to acquire something the core needs from the outside world.
///
/// Startup code should report these to the user; none of them indicate a
/// defect in the simulation.
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Tuning(#[from] TuningError),

    /// The host's text provider could not produce a label
    #[error("failed to render label {content:?}: {reason}")]
    Label { content: String, reason: String },

    /// A sprite or texture handle was unavailable
    #[error("texture {name} unavailable: {reason}")]
    Texture { name: String, reason: String },

    #[error("invalid word list: {0}")]
    WordList(String),
}

pub type ResourceResult<T> = Result<T, ResourceError>;
