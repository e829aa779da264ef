//! Error types for the pixelift service.
//!
//! This module defines a single error enum covering the resampling core,
//! the codec boundary and the HTTP service around it.

use thiserror::Error;

/// The main error type for pixelift operations.
#[derive(Error, Debug)]
pub enum PixeliftError {
    /// Zero or overflowing grid dimensions, or a zero scale factor
    #[error("Invalid dimensions: {message}")]
    InvalidDimensions { message: String },

    /// Unrecognized resampling technique
    #[error("Invalid technique: '{value}'. Must be one of: nearest, bilinear")]
    InvalidTechnique { value: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Payload could not be turned into image bytes (bad data URL, bad base64)
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Image decoding errors from the image crate
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Image encoding errors
    #[error("Image encoding error: {message}")]
    ImageEncoding { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl PixeliftError {
    /// Whether the error was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PixeliftError::InvalidDimensions { .. }
                | PixeliftError::InvalidTechnique { .. }
                | PixeliftError::InvalidParameter { .. }
                | PixeliftError::Decode { .. }
                | PixeliftError::Image(_)
                | PixeliftError::Json(_)
        )
    }
}

/// Convenience type alias for Results with PixeliftError
pub type Result<T> = std::result::Result<T, PixeliftError>;
