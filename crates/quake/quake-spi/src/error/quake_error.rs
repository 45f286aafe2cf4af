//! Quake error types

use crate::model::MalformedReason;
use thiserror::Error;

/// Errors that can occur while analyzing or forecasting a region
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuakeError {
    /// Region name is not present in the registry
    #[error("Unknown region '{name}'")]
    InvalidRegion { name: String },

    /// Not enough qualifying events to derive an interval-based prediction
    #[error("Insufficient data for '{region}': need at least {required} events, got {actual}")]
    InsufficientData {
        region: String,
        required: usize,
        actual: usize,
    },

    /// Catalog record that cannot take part in the analysis
    #[error("Malformed event: {reason}")]
    MalformedEvent { reason: MalformedReason },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    Numerical(String),

    /// Configuration could not be read or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}

impl QuakeError {
    /// Shorthand for an [`QuakeError::InvalidParameter`]
    pub fn invalid_parameter(name: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}
