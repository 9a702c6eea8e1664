//! Error types for the encoder and rasterizer

use thiserror::Error;

/// Result type alias for encoder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or reading an artifact
#[derive(Error, Debug)]
pub enum Error {
    /// A chunk type tag was not exactly four ASCII letters
    #[error("Invalid chunk type {0:?}: expected 4 ASCII letters")]
    InvalidChunkType(Vec<u8>),

    /// Width or height was zero
    #[error("Invalid dimensions {width}x{height}: both must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Scanline buffer length disagrees with the declared dimensions
    #[error("Scanline buffer is {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Chunk payload does not fit the 32-bit length field
    #[error("Chunk payload of {0} bytes exceeds the 32-bit length field")]
    PayloadTooLarge(usize),

    /// Failed to compress the image data
    #[error("Compression failed: {0}")]
    CompressionError(String),

    /// A byte stream is not a well-formed artifact
    #[error("Decode failed: {0}")]
    DecodeError(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Scene or config file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
