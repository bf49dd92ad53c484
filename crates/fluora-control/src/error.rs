//! Error types for plant control
use fluora_core::{AnimationMode, CatalogError};
use thiserror::Error;

use crate::telemetry::TelemetryError;

/// Plant control errors
#[derive(Error, Debug)]
pub enum ControlError {
    /// Level parameter outside the closed interval [0, 1]
    #[error("Parameter out of range: {param} must be between 0 and 1, got {value}")]
    OutOfRange {
        /// Name of the offending parameter
        param: &'static str,
        /// The rejected value
        value: f32,
    },

    /// Switch parameter that is neither 0 (off) nor 1 (on)
    #[error("Invalid state for {param}: must be 0 (Off) or 1 (On), got {value}")]
    InvalidState {
        /// Name of the offending parameter
        param: &'static str,
        /// The rejected value
        value: u8,
    },

    /// Animation or mode lookup failure
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Telemetry frame could not be reassembled or decoded
    #[error("Malformed telemetry: {0}")]
    MalformedTelemetry(#[from] TelemetryError),

    /// The mode-select message went out but the index message failed;
    /// the plant is already in the new mode
    #[error("Animation index not sent after mode change to {mode}: {source}")]
    AnimationIndexNotSent {
        /// Mode the plant was switched to before the failure
        mode: AnimationMode,
        /// The underlying send failure
        #[source]
        source: Box<ControlError>,
    },

    /// OSC encoding error
    #[error("OSC error: {0}")]
    OscError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for control operations
pub type Result<T> = std::result::Result<T, ControlError>;
