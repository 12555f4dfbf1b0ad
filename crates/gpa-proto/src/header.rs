//! Chunk header implementation with zero-copy parsing.
//!
//! The `ChunkHeader` is a fixed 24-byte record that precedes every chunk body
//! in a palette file: a 16-byte zero-padded ASCII tag followed by the body
//! length as a little-endian `u64`.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{
    ChunkTag,
    errors::{ChunkError, Result},
};

/// Fixed 24-byte chunk header (Little Endian)
///
/// Fields are stored as raw byte arrays so that any 24-byte pattern can be
/// cast to a header without alignment concerns.
///
/// # Invariants
///
/// - **Terminated Tag**: The last byte of `tag` is always zero. Headers built
///   with [`ChunkHeader::new`] truncate long tags to 15 bytes, and
///   [`ChunkHeader::from_bytes`] rejects headers that violate this. This is the
///   only structural check the framing performs.
///
/// - **Self-Sizing**: `size` is the exact number of body bytes that follow the
///   header. A reader can skip any chunk without looking at its body.
#[repr(C, packed)]
#[derive(Clone, Copy, FromBytes, IntoBytes, KnownLayout, Immutable)]
pub struct ChunkHeader {
    tag: [u8; 16], // ASCII, zero-padded on the right
    size: [u8; 8], // u64 body length
}

impl ChunkHeader {
    /// Size of the serialized header (24 bytes)
    pub const SIZE: usize = 24;

    /// Width of the tag field
    pub const TAG_LEN: usize = 16;

    /// Build a header for `tag` with the given body length.
    ///
    /// Tags longer than 15 bytes are truncated so the field stays
    /// zero-terminated. Bytes after the first NUL in `tag` are kept as-is, so
    /// callers should pass plain ASCII names.
    #[must_use]
    pub fn new(tag: &[u8], size: u64) -> Self {
        let len = tag.len().min(Self::TAG_LEN - 1);
        let mut field = [0u8; Self::TAG_LEN];
        field[..len].copy_from_slice(&tag[..len]);

        Self { tag: field, size: size.to_le_bytes() }
    }

    /// Build a header for one of the known chunk tags.
    #[must_use]
    pub fn for_tag(tag: ChunkTag, size: u64) -> Self {
        Self::new(tag.as_bytes(), size)
    }

    /// Parse a header from the front of `bytes` (zero-copy)
    ///
    /// # Errors
    ///
    /// Returns `ChunkError` if:
    /// - Buffer is shorter than 24 bytes
    /// - The tag field is not zero-terminated
    pub fn from_bytes(bytes: &[u8]) -> Result<&Self> {
        let header = Self::ref_from_prefix(bytes)
            .map_err(|_| ChunkError::HeaderTooShort { expected: Self::SIZE, actual: bytes.len() })?
            .0;

        if header.tag[Self::TAG_LEN - 1] != 0 {
            return Err(ChunkError::UnterminatedTag);
        }

        Ok(header)
    }

    /// Serialize header to bytes
    #[must_use]
    #[allow(clippy::wrong_self_convention)]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut arr = [0u8; Self::SIZE];
        arr.copy_from_slice(IntoBytes::as_bytes(self));
        arr
    }

    /// Raw 16-byte tag field, including padding
    #[must_use]
    pub fn tag_field(&self) -> &[u8; 16] {
        &self.tag
    }

    /// Tag bytes up to (not including) the first NUL
    #[must_use]
    pub fn tag_bytes(&self) -> &[u8] {
        let end = self.tag.iter().position(|&b| b == 0).unwrap_or(Self::TAG_LEN);
        &self.tag[..end]
    }

    /// Tag as a known chunk type, if it is one
    #[must_use]
    pub fn tag(&self) -> Option<ChunkTag> {
        ChunkTag::from_bytes(self.tag_bytes())
    }

    /// Declared body length
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::from_le_bytes(self.size)
    }
}

// Manual Debug implementation (can't derive due to packed repr)
impl std::fmt::Debug for ChunkHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkHeader")
            .field("tag", &String::from_utf8_lossy(self.tag_bytes()))
            .field("size", &self.size())
            .finish()
    }
}

// Manual PartialEq implementation (can't derive due to packed repr)
impl PartialEq for ChunkHeader {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes() == other.to_bytes()
    }
}

impl Eq for ChunkHeader {}
