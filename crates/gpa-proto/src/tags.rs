//! Chunk type tags for GPA palette files.
//!
//! Tags identify what a chunk body contains. They are stored as zero-padded
//! ASCII in the first 16 bytes of every [`ChunkHeader`](crate::ChunkHeader).
//!
//! # Known Tags
//!
//! - `"GPA version"`: 4-byte format version
//! - `"handler_map"`: value codec registry
//! - `"color_list"`: one encoded record per color entry
//! - `"color_positions"`: one `u32` position per color entry
//! - `"color_actions"`: reserved, never written, always skipped
//!
//! Any other tag is unknown to this build. Readers skip unknown chunks by
//! their declared size, which is what lets old readers open newer files.

/// Chunk types understood by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkTag {
    /// File format version
    Version,
    /// Serialized value handler registry
    HandlerMap,
    /// Encoded color entry records
    ColorList,
    /// Entry positions, `u32::MAX` meaning hidden
    ColorPositions,
    /// Reserved
    ColorActions,
}

impl ChunkTag {
    /// All known tags, in the order a writer emits them
    pub const ALL: [Self; 5] =
        [Self::Version, Self::HandlerMap, Self::ColorList, Self::ColorPositions, Self::ColorActions];

    /// ASCII name as written in the header (without padding)
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Version => b"GPA version",
            Self::HandlerMap => b"handler_map",
            Self::ColorList => b"color_list",
            Self::ColorPositions => b"color_positions",
            Self::ColorActions => b"color_actions",
        }
    }

    /// Match tag bytes (already stripped of padding) against the known tags
    ///
    /// Returns `None` for tags this build does not recognize. Unknown tags are
    /// not an error; the chunk is simply skipped.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_bytes() == bytes)
    }
}

impl std::fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Known tags are plain ASCII
        f.write_str(std::str::from_utf8(self.as_bytes()).unwrap_or("?"))
    }
}
