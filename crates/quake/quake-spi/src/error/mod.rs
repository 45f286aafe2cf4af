//! Error module containing error types and result aliases

mod quake_error;

pub use quake_error::QuakeError;

/// Result type for quake operations
pub type Result<T> = std::result::Result<T, QuakeError>;
