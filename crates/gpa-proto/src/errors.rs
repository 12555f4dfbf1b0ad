//! Error types for GPA chunk framing.
//!
//! All errors are structured, testable, and provide actionable information.

use thiserror::Error;

/// Framing errors that can occur while decoding chunk headers and bodies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkError {
    /// Buffer is shorter than a chunk header
    #[error("chunk header too short: expected {expected} bytes, got {actual}")]
    HeaderTooShort {
        /// Expected header size in bytes
        expected: usize,
        /// Actual size available
        actual: usize,
    },

    /// Last byte of the tag field is not zero
    #[error("chunk tag is not zero-terminated")]
    UnterminatedTag,

    /// Header claims more body bytes than are available
    #[error("chunk body truncated: header claims {expected} bytes, but only {actual} available")]
    BodyTruncated {
        /// Body length declared by the header
        expected: u64,
        /// Bytes actually available after the header
        actual: u64,
    },

    /// Body is too short to hold a version number
    #[error("version body too short: expected 4 bytes, got {0}")]
    VersionTooShort(usize),
}

/// Convenient Result type alias for framing operations
pub type Result<T> = std::result::Result<T, ChunkError>;
