//! Error types for the radiator crate.
//!
//! A single error enum covers every failure mode: style configuration,
//! colormap/normalization lookup, geometry construction, and raster output.

use thiserror::Error;

/// The main error type for radiator operations.
#[derive(Error, Debug)]
pub enum RadiatorError {
    /// IO errors (style files, saved images)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding/decoding errors
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Style configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Coordinate sequences of different lengths
    #[error("Mismatched coordinate lengths: x has {x_len} points, y has {y_len}")]
    MismatchedLengths { x_len: usize, y_len: usize },

    /// Normalization errors (invalid ranges, log of non-positive values)
    #[error("Normalization error: {message}")]
    Normalization { message: String },

    /// Raster rendering errors
    #[error("Render error: {message}")]
    Render { message: String },
}

/// Convenience type alias for Results with RadiatorError
pub type Result<T> = std::result::Result<T, RadiatorError>;
