//! File format version carried in the `"GPA version"` chunk.

use crate::errors::{ChunkError, Result};

/// Palette file format version
///
/// Stored on disk as a little-endian `u32` equal to `major * 0x10000 + minor`.
/// Readers treat the value as advisory: it is reported to the caller but does
/// not change how the remaining chunks are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FormatVersion {
    /// Major version
    pub major: u16,
    /// Minor version
    pub minor: u16,
}

impl FormatVersion {
    /// Version written by this crate (1.0)
    pub const CURRENT: Self = Self { major: 1, minor: 0 };

    /// Size of the encoded version body
    pub const SIZE: usize = 4;

    /// Create a version from its parts
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// Packed `major * 0x10000 + minor` value
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        ((self.major as u32) << 16) | self.minor as u32
    }

    /// Unpack from the on-disk `u32`
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Self { major: (value >> 16) as u16, minor: (value & 0xFFFF) as u16 }
    }

    /// Encode as a version chunk body
    #[must_use]
    pub const fn to_bytes(self) -> [u8; Self::SIZE] {
        self.to_u32().to_le_bytes()
    }

    /// Decode from the front of a version chunk body
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::VersionTooShort`] if fewer than 4 bytes are
    /// available. Extra bytes are ignored.
    pub fn from_bytes(body: &[u8]) -> Result<Self> {
        let raw: [u8; Self::SIZE] = body
            .get(..Self::SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or(ChunkError::VersionTooShort(body.len()))?;
        Ok(Self::from_u32(u32::from_le_bytes(raw)))
    }
}

impl Default for FormatVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl std::fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
