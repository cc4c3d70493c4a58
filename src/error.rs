//! Error types for HueStream

use thiserror::Error;

/// Result type alias for HueStream operations
pub type Result<T> = std::result::Result<T, Error>;

/// HueStream error type
#[derive(Error, Debug)]
pub enum Error {
    // Frame errors
    #[error("Frame buffer holds {actual} bytes, {width}x{height} NV12 needs {expected}")]
    FrameSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("Truncated frame at end of stream: expected {expected} bytes, got {got}")]
    TruncatedFrame { expected: usize, got: usize },

    // Effect errors
    #[error("Unknown hue mode: {0}")]
    UnknownHueMode(String),

    // Pipeline errors
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    // General errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this error describes malformed input data rather than an
    /// environment failure
    pub fn is_data_error(&self) -> bool {
        matches!(self, Error::FrameSize { .. } | Error::TruncatedFrame { .. })
    }
}
