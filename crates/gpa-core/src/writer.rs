//! Palette writer.
//!
//! Chunks are written in a fixed order:
//!
//! 1. `"GPA version"` (4 bytes)
//! 2. `"handler_map"` (codec output, backpatched)
//! 3. `"color_list"` (one record per entry, backpatched)
//! 4. `"color_positions"` (4 bytes per entry)
//!
//! The handler map and color list bodies come out of the record codec and
//! their length is only known once it finishes. Instead of buffering those
//! bodies, the writer emits a placeholder header, streams the body, then
//! seeks back to fill in the real size. The sink therefore has to be
//! seekable.

use std::{
    fs::File,
    io::{self, BufWriter, Cursor, Seek, SeekFrom, Write},
    path::Path,
};

use gpa_proto::{Chunk, ChunkHeader, ChunkTag};

use crate::{
    ColorList, WriterConfig,
    dynv::{CborCodec, RecordCodec},
    error::{PaletteError, Result},
    handler_map, resolver,
};

/// Writes a [`ColorList`] as a palette file
#[derive(Debug, Clone, Default)]
pub struct PaletteWriter<C = CborCodec> {
    codec: C,
    config: WriterConfig,
}

impl PaletteWriter {
    /// Writer using the CBOR record codec and default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: RecordCodec> PaletteWriter<C> {
    /// Writer using a custom record codec
    pub fn with_codec(codec: C) -> Self {
        Self { codec, config: WriterConfig::default() }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: WriterConfig) -> Self {
        self.config = config;
        self
    }

    /// Create (or truncate) `path` and write `list` into it
    ///
    /// The file is written in place; a failure part way through leaves a
    /// partial file behind.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Open`] if the file cannot be created, or any
    /// error from [`PaletteWriter::save`].
    pub fn save_file(&self, list: &ColorList, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|source| PaletteError::Open { path: path.to_path_buf(), source })?;

        tracing::debug!(path = %path.display(), entries = list.len(), "Saving palette");

        let mut sink = BufWriter::new(file);
        self.save(list, &mut sink)?;
        sink.flush()?;
        Ok(())
    }

    /// Encode `list` into a new byte vector
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Encode`] if the codec rejects an entry.
    pub fn to_bytes(&self, list: &ColorList) -> Result<Vec<u8>> {
        let mut sink = Cursor::new(Vec::new());
        self.save(list, &mut sink)?;
        Ok(sink.into_inner())
    }

    /// Write `list` at the current position of `sink`
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Io`] if a write or seek fails, or
    /// [`PaletteError::Encode`] if the codec rejects the handler map or an
    /// entry.
    pub fn save<W: Write + Seek>(&self, list: &ColorList, sink: &mut W) -> Result<()> {
        write_chunk(sink, &Chunk::tagged(ChunkTag::Version, self.config.version.to_bytes().to_vec()))?;

        let map_size = backpatched(sink, ChunkTag::HandlerMap, |sink| {
            handler_map::write(&self.codec, list, sink).map_err(PaletteError::from)
        })?;

        let list_size = backpatched(sink, ChunkTag::ColorList, |sink| {
            for entry in list {
                self.codec.write_record(list.handlers(), &entry.to_record(), sink)?;
            }
            Ok(())
        })?;

        let positions = resolver::encode_positions(list);
        write_chunk(sink, &Chunk::tagged(ChunkTag::ColorPositions, positions))?;

        tracing::debug!(
            version = %self.config.version,
            handler_map_size = map_size,
            color_list_size = list_size,
            entries = list.len(),
            "Palette written"
        );

        Ok(())
    }
}

/// Write a chunk whose body is already known
fn write_chunk<W: Write>(sink: &mut W, chunk: &Chunk) -> io::Result<()> {
    let mut buf = Vec::with_capacity(chunk.encoded_len());
    chunk.encode(&mut buf);
    sink.write_all(&buf)
}

/// Write a chunk whose body length is only known after `body` runs
///
/// Reserves the header, lets `body` stream into the sink, then seeks back to
/// write the real size and returns to the end. Returns the body size.
fn backpatched<W, F>(sink: &mut W, tag: ChunkTag, body: F) -> Result<u64>
where
    W: Write + Seek,
    F: FnOnce(&mut W) -> Result<()>,
{
    let start = sink.stream_position()?;
    sink.write_all(&ChunkHeader::for_tag(tag, 0).to_bytes())?;

    body(sink)?;

    let end = sink.stream_position()?;
    let size = end.checked_sub(start + ChunkHeader::SIZE as u64).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "sink position moved before chunk header")
    })?;

    sink.seek(SeekFrom::Start(start))?;
    sink.write_all(&ChunkHeader::for_tag(tag, size).to_bytes())?;
    sink.seek(SeekFrom::Start(end))?;

    tracing::trace!(%tag, size, offset = start, "Backpatched chunk header");
    Ok(size)
}
