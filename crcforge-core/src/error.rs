//! Error types for crcforge operations.
//!
//! This module provides the error type returned by every fallible operation
//! in the crate: stream I/O, position validation, and the internal
//! assertions that guard algorithm parameter shape.

use std::io;
use thiserror::Error;

/// The main error type for crcforge operations.
#[derive(Debug, Error)]
pub enum CrcForgeError {
    /// I/O error from the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// `target_pos` fell outside the bounds of the source stream.
    #[error("invalid position {target_pos}: source is {source_len} bytes long")]
    InvalidPosition {
        /// The position that was requested.
        target_pos: i64,
        /// Length of the source stream in bytes.
        source_len: u64,
    },

    /// The stream returned fewer bytes than the declared window required.
    #[error("short read: expected {expected} bytes, got {actual}")]
    ShortRead {
        /// Number of bytes that were expected.
        expected: usize,
        /// Number of bytes actually returned.
        actual: usize,
    },

    /// An algorithm descriptor violated one of its own shape invariants.
    #[error("programming error: {message}")]
    ProgrammingError {
        /// Description of the violated invariant.
        message: String,
    },
}

/// Result type alias for crcforge operations.
pub type Result<T> = std::result::Result<T, CrcForgeError>;

impl CrcForgeError {
    /// Create an invalid-position error.
    pub fn invalid_position(target_pos: i64, source_len: u64) -> Self {
        Self::InvalidPosition {
            target_pos,
            source_len,
        }
    }

    /// Create a short-read error.
    pub fn short_read(expected: usize, actual: usize) -> Self {
        Self::ShortRead { expected, actual }
    }

    /// Create a programming error.
    pub fn programming_error(message: impl Into<String>) -> Self {
        Self::ProgrammingError {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CrcForgeError::invalid_position(-1, 4);
        assert!(err.to_string().contains("invalid position"));

        let err = CrcForgeError::short_read(10, 3);
        assert!(err.to_string().contains("short read"));

        let err = CrcForgeError::programming_error("num_bits must be a multiple of 8");
        assert!(err.to_string().contains("num_bits"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: CrcForgeError = io_err.into();
        assert!(matches!(err, CrcForgeError::Io(_)));
    }
}
