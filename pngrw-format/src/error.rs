//! Error types for pngrw

use thiserror::Error;

/// pngrw error types
#[derive(Debug, Error)]
pub enum PngrwError {
    /// Input does not start with the 8-byte PNG signature.
    #[error("Not a PNG: bad signature")]
    InvalidSignature,
    /// Encountered unexpected end of input.
    #[error("Unexpected end of file")]
    UnexpectedEof,
    /// A NUL-terminated field is missing its terminator byte.
    #[error("Missing null separator in text chunk")]
    MissingNullSeparator,
    /// A text chunk ended before its declared layout was complete.
    #[error("Truncated text chunk")]
    TruncatedTextChunk,
    /// Stored chunk CRC does not match the chunk contents.
    #[error("CRC mismatch")]
    ChecksumMismatch,
    /// Compression method byte is not the deflate method PNG defines.
    #[error("Unsupported compression method: {0}")]
    UnsupportedCompressionMethod(u8),
    /// zlib stream could not be inflated.
    #[error("Inflate error: {0}")]
    Inflate(String),
    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// I/O operation failed while reading or writing data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PngrwError>;
