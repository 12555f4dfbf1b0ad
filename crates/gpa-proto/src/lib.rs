//! # GPA Palette Format: Chunk Framing
//!
//! This crate implements the framing layer of the GPA palette file format.
//!
//! ## Format
//!
//! A palette file is a flat sequence of chunks:
//! - **ChunkHeader**: 24 bytes, a 16-byte zero-padded ASCII tag followed by
//!   the body length as a little-endian `u64`
//! - **Body**: exactly `size` bytes, interpreted according to the tag
//!
//! There is no file magic, index, or checksum. Every chunk sizes itself, so a
//! reader can step over tags it does not know without looking inside them.
//!
//! ## Implementation Notes
//!
//! - **Zero-Copy Parsing**: [`ChunkHeader`] is cast straight from file bytes
//!   with [`zerocopy`](https://docs.rs/zerocopy); all 24-byte patterns are
//!   representable, and the only validation is the terminating NUL of the tag.
//!
//! - **Opaque Bodies**: This crate never interprets chunk bodies beyond the
//!   version number. Color records and the handler map are encoded by the
//!   value codec in `gpa-core`.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chunk;
pub mod errors;
pub mod header;
pub mod tags;
pub mod version;

pub use chunk::Chunk;
pub use errors::{ChunkError, Result};
pub use header::ChunkHeader;
pub use tags::ChunkTag;
pub use version::FormatVersion;
