//! Chunk type combining header and body.
//!
//! A `Chunk` is the unit of a palette file:
//! - 24-byte header (tag + little-endian body length)
//! - Body bytes, opaque at this layer
//!
//! Writers that know a body up front (version, positions) build a `Chunk`
//! and encode it in one go. Variable-length bodies produced by the value
//! codec are written with a reserved header instead; see `gpa-core`.

use bytes::{BufMut, Bytes};

use crate::{
    ChunkHeader, ChunkTag,
    errors::{ChunkError, Result},
};

/// Complete chunk (header + body)
///
/// Layout on disk:
/// `[ChunkHeader: 24 bytes] + [body: header.size() bytes]`
///
/// # Invariants
///
/// - **Size Consistency**: `body.len()` MUST match `header.size()`. This is
///   enforced by [`Chunk::new`] and verified by [`Chunk::decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk header (24 bytes)
    pub header: ChunkHeader,

    /// Raw body bytes
    pub body: Bytes,
}

impl Chunk {
    /// Create a chunk with an arbitrary tag; the header size is taken from the
    /// body.
    #[must_use]
    pub fn new(tag: &[u8], body: impl Into<Bytes>) -> Self {
        let body = body.into();
        let header = ChunkHeader::new(tag, body.len() as u64);
        Self { header, body }
    }

    /// Create a chunk for a known tag
    #[must_use]
    pub fn tagged(tag: ChunkTag, body: impl Into<Bytes>) -> Self {
        Self::new(tag.as_bytes(), body)
    }

    /// Total encoded length (header + body)
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        ChunkHeader::SIZE + self.body.len()
    }

    /// Encode chunk into buffer
    ///
    /// Writes: `[header (24 bytes)] + [body (variable)]`
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_slice(&self.header.to_bytes());
        dst.put_slice(&self.body);
    }

    /// Decode one chunk from the front of `bytes`
    ///
    /// Trailing bytes after the body are ignored; use
    /// [`Chunk::encoded_len`] to step to the next chunk.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Header parsing fails (too short, unterminated tag)
    /// - Body is truncated (fewer bytes than the header claims)
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let header = ChunkHeader::from_bytes(bytes)?;

        let available = (bytes.len() - ChunkHeader::SIZE) as u64;
        if header.size() > available {
            return Err(ChunkError::BodyTruncated { expected: header.size(), actual: available });
        }

        // size <= available <= usize::MAX
        let end = ChunkHeader::SIZE + header.size() as usize;
        let body = Bytes::copy_from_slice(&bytes[ChunkHeader::SIZE..end]);

        Ok(Self { header: *header, body })
    }
}
