//! Reader and writer configuration.

use gpa_proto::FormatVersion;

/// Reader configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Largest chunk body the reader will buffer
    ///
    /// Known chunks declaring a larger body are skipped like unknown ones and
    /// reported with a warning. Bodies are buffered whole, so this bounds the
    /// memory a single header can make the reader allocate.
    pub max_chunk_size: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { max_chunk_size: 256 * 1024 * 1024 }
    }
}

/// Writer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriterConfig {
    /// Version stamped into the version chunk
    pub version: FormatVersion,
}
