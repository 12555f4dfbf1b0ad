//! Load diagnostics.
//!
//! A palette load succeeds whenever the source can be opened. Everything
//! that went wrong after that is described here, so callers can tell a clean
//! end of file from a corrupted or truncated one.

use gpa_proto::FormatVersion;

/// Why the chunk scan stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEnd {
    /// Stream ended exactly on a chunk boundary
    EndOfStream,
    /// Fewer than 24 bytes were left for a header
    TruncatedHeader {
        /// Stream offset of the partial header
        offset: u64,
    },
    /// Header tag was not zero-terminated
    CorruptHeader {
        /// Stream offset of the bad header
        offset: u64,
    },
    /// A known chunk declared more body bytes than the stream holds
    TruncatedBody {
        /// Tag of the truncated chunk
        tag: String,
        /// Stream offset of the chunk header
        offset: u64,
    },
    /// Skipping a chunk would move past the end of the stream
    SkipPastEnd {
        /// Tag of the skipped chunk
        tag: String,
        /// Stream offset of the chunk header
        offset: u64,
    },
}

impl ScanEnd {
    /// True if the scan consumed the whole stream
    #[must_use]
    pub fn is_clean(&self) -> bool {
        matches!(self, Self::EndOfStream)
    }
}

/// Non-fatal problems found while loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// Version chunk body was shorter than 4 bytes
    UnreadableVersion,
    /// File was written by a newer major format version
    NewerVersion(FormatVersion),
    /// Handler map chunk could not be decoded; records that need it will stop
    UnreadableHandlerMap(String),
    /// A color list chunk stopped at a record that failed to decode
    RecordsStopped {
        /// Records decoded from that chunk before the failure
        decoded: usize,
        /// Decoder message
        reason: String,
    },
    /// Positions chunk held fewer positions than pending entries
    PositionShortfall {
        /// Entries waiting for a position
        expected: usize,
        /// Positions actually assigned
        assigned: usize,
    },
    /// A known chunk was larger than the configured limit and was skipped
    OversizedChunk {
        /// Tag of the skipped chunk
        tag: String,
        /// Declared body length
        size: u64,
    },
    /// Entries decoded after the last positions chunk were kept unpositioned
    UnpositionedEntries(usize),
}

/// Outcome of a successful load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    /// Format version from the version chunk, if one was read
    pub version: Option<FormatVersion>,
    /// Why scanning stopped
    pub end: ScanEnd,
    /// Problems that did not stop the load
    pub warnings: Vec<LoadWarning>,
    /// Entries moved into the destination list
    pub entries_loaded: usize,
}

impl LoadReport {
    /// True if the whole stream was read and nothing needed a warning
    ///
    /// A `false` here does not mean the load failed, only that the list may
    /// be missing entries the file was meant to carry.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.end.is_clean() && self.warnings.is_empty()
    }
}
