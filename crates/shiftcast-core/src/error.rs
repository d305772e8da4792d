//! Core error types for shiftcast-core.
//!
//! This module defines the error hierarchy using thiserror. Each concern
//! (series structure, grid layout, generator parameters, configuration)
//! has its own enum; [`CoreError`] aggregates them.

use std::path::PathBuf;
use thiserror::Error;

use crate::series::TimeLabel;

/// Core error type for shiftcast-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A series violated its structural invariants
    #[error("Invalid series: {0}")]
    Series(#[from] SeriesError),

    /// The horizon grid could not be built
    #[error("Invalid grid: {0}")]
    Grid(#[from] GridError),

    /// A generator was given parameters it cannot work with
    #[error("Invalid generator input: {0}")]
    Generator(#[from] GeneratorError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Time label parsing errors
    #[error("Time label error: {0}")]
    Label(#[from] LabelError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Structural problems in a time series.
///
/// Any of these means the series was built incorrectly; a series carrying
/// one never reaches the query engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("series has no points")]
    Empty,

    #[error("time labels must be strictly increasing: {current} at index {index} follows {previous}")]
    NonMonotonic {
        index: usize,
        previous: TimeLabel,
        current: TimeLabel,
    },

    #[error("series has no point marked as now")]
    MissingNow,

    #[error("series has more than one now point ({first} and {second})")]
    MultipleNow { first: TimeLabel, second: TimeLabel },

    #[error("point {time} is at or before now but has no actual value")]
    MissingActual { time: TimeLabel },

    #[error("point {time} is after now but carries an actual value")]
    UnexpectedActual { time: TimeLabel },

    #[error("point {time} is before now but carries a prediction or band")]
    UnexpectedPrediction { time: TimeLabel },

    #[error("point {time} is at or after now but has no {field}")]
    MissingPrediction { time: TimeLabel, field: &'static str },

    #[error("now point {time} has actual {actual} but predicted {predicted}")]
    StitchMismatch {
        time: TimeLabel,
        actual: f64,
        predicted: f64,
    },

    #[error("band inverted at {time}: lower {lower}, predicted {predicted}, upper {upper}")]
    BandInversion {
        time: TimeLabel,
        lower: f64,
        predicted: f64,
        upper: f64,
    },

    #[error("lower bound at {time} is negative ({lower})")]
    NegativeLowerBound { time: TimeLabel, lower: f64 },

    #[error("{field} at {time} is not a finite number")]
    NonFinite { time: TimeLabel, field: &'static str },
}

/// Problems with a horizon grid definition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid needs at least 2 points, got {0}")]
    TooFewPoints(usize),

    #[error("now index {now_index} leaves no forecast horizon in a {points}-point grid")]
    NoHorizon { now_index: usize, points: usize },

    #[error("grid step must be positive")]
    ZeroStep,

    #[error("grid starting at {start} runs past midnight")]
    PastMidnight { start: TimeLabel },

    #[error("grid labels must be strictly increasing: {current} follows {previous}")]
    NonMonotonic {
        previous: TimeLabel,
        current: TimeLabel,
    },
}

/// Invalid inputs to a trajectory generator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Invalid value for '{field}': {message}")]
    InvalidParameter { field: &'static str, message: String },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("generator produced an invalid series: {0}")]
    Series(#[from] SeriesError),
}

impl GeneratorError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            message: message.into(),
        }
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key not present in the configuration
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// The configuration directory could not be determined or created
    #[error("Configuration directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

/// A time label that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{input}' is not a time of day (expected HH:MM or HH:MM:SS)")]
pub struct LabelError {
    pub input: String,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
