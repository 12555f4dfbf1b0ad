//! Error types for palette loading and saving.
//!
//! Only failures the caller must act on are errors. Anomalies inside a file
//! being read (corrupt headers, undecodable records, short position lists)
//! end the scan early and are reported through
//! [`LoadReport`](crate::LoadReport) instead.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::dynv::RecordError;

/// Errors returned by palette load/save operations
#[derive(Error, Debug)]
pub enum PaletteError {
    /// Source or destination file could not be opened
    #[error("cannot open palette file {}: {source}", path.display())]
    Open {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Read, write, or seek failed on an open stream
    #[error("palette i/o error: {0}")]
    Io(#[from] io::Error),

    /// The record codec refused to encode a handler map or entry
    #[error("failed to encode palette: {0}")]
    Encode(#[from] RecordError),
}

impl PaletteError {
    /// Returns true if the error happened before any byte was read or
    /// written.
    pub fn is_open_failure(&self) -> bool {
        matches!(self, Self::Open { .. })
    }
}

/// Convenient Result type alias for palette operations
pub type Result<T> = std::result::Result<T, PaletteError>;
