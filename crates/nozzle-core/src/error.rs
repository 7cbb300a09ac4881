//! Error types for nozzle-core

use nozzle_cad::SurfaceError;
use thiserror::Error;

/// Errors raised while resolving parameters or generating a sketch
#[derive(Debug, Clone, Error)]
pub enum NozzleError {
    #[error("Invalid nozzle parameters: {0}")]
    InvalidParameters(String),

    #[error("Invalid generator options: {0}")]
    InvalidOptions(String),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Sketch surface error: {0}")]
    Surface(#[from] SurfaceError),
}

/// Result type for nozzle operations
pub type NozzleResult<T> = Result<T, NozzleError>;

/// Errors reading or writing parameter and option files
#[derive(Debug, Clone, Error)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
