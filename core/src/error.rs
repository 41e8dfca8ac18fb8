//! Error types for the bore designer.

use thiserror::Error;

/// Result type for design operations.
pub type Result<T> = std::result::Result<T, DesignError>;

#[derive(Debug, Error)]
pub enum DesignError {
    /// The design document could not be decoded.
    #[error("invalid design document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parameter falls outside the slider range offered by the UI.
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("no tone hole numbered {0}")]
    UnknownHole(u32),

    #[error("cannot render a tone at {0} Hz")]
    InvalidFrequency(f64),

    #[error("audio encoding failed: {0}")]
    Audio(#[from] hound::Error),

    #[error("nothing stored under '{0}'")]
    MissingKey(String),
}
