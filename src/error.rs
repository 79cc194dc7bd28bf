//! Error types for cell conversion and bucketing.

use thiserror::Error;

/// Boxed error coming from a caller-supplied sink or clipper.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum QuadcellError {
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Coordinate ({x}, {y}) is outside the configured bounds")]
    OutOfBounds { x: f64, y: f64 },

    #[error("Invalid cell id: {0}")]
    InvalidCellId(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Feature has no points")]
    EmptyFeature,

    #[error("Output sink failed: {0}")]
    Sink(#[source] BoxError),

    #[error("Feature clipper failed: {0}")]
    Clipper(#[source] BoxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML decode error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[cfg(feature = "toml")]
    #[error("TOML encode error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl QuadcellError {
    /// Wrap an error raised by an output sink.
    pub fn sink<E: Into<BoxError>>(err: E) -> Self {
        Self::Sink(err.into())
    }

    /// Wrap an error raised by a feature clipper.
    pub fn clipper<E: Into<BoxError>>(err: E) -> Self {
        Self::Clipper(err.into())
    }
}

pub type Result<T> = std::result::Result<T, QuadcellError>;
