//! Palette reader: sequential chunk scanner.
//!
//! The reader walks the stream one chunk at a time. Known chunks are
//! buffered and handed to the record codec or the resolver; everything else
//! is skipped by its declared size without being read.
//!
//! # Lenience
//!
//! Once the source is open, nothing inside it is fatal. A corrupt header, a
//! truncated body, an undecodable record or a short positions chunk ends the
//! relevant part of the scan and the load still succeeds with whatever was
//! decoded. The [`LoadReport`] says why scanning stopped. Only real I/O
//! failures (not end of file) are returned as errors.

use std::{
    fs::File,
    io::{self, BufReader, Cursor, Read, Seek, SeekFrom},
    path::Path,
};

use gpa_proto::{ChunkHeader, ChunkTag, FormatVersion};

use crate::{
    ColorEntry, ColorList, ReaderConfig, handler_map,
    dynv::{CborCodec, HandlerTable, RecordCodec},
    error::{PaletteError, Result},
    report::{LoadReport, LoadWarning, ScanEnd},
    resolver,
};

/// Reads palette files into a [`ColorList`]
#[derive(Debug, Clone, Default)]
pub struct PaletteReader<C = CborCodec> {
    codec: C,
    config: ReaderConfig,
}

impl PaletteReader {
    /// Reader using the CBOR record codec and default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: RecordCodec> PaletteReader<C> {
    /// Reader using a custom record codec
    pub fn with_codec(codec: C) -> Self {
        Self { codec, config: ReaderConfig::default() }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Open `path` and load it into `list`
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Open`] if the file cannot be opened, or
    /// [`PaletteError::Io`] if reading fails for a reason other than end of
    /// file.
    pub fn load_file(&self, path: impl AsRef<Path>, list: &mut ColorList) -> Result<LoadReport> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|source| PaletteError::Open { path: path.to_path_buf(), source })?;

        tracing::debug!(path = %path.display(), "Loading palette");
        self.load(BufReader::new(file), list)
    }

    /// Load an in-memory palette file into `list`
    ///
    /// # Errors
    ///
    /// Never fails for in-memory input; the `Result` mirrors
    /// [`PaletteReader::load`].
    pub fn load_bytes(&self, bytes: &[u8], list: &mut ColorList) -> Result<LoadReport> {
        self.load(Cursor::new(bytes), list)
    }

    /// Load chunks from the current position of `source` to its end
    ///
    /// Entries are appended to `list` in position order. Entries already in
    /// `list` are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Io`] if a read or seek fails for a reason other
    /// than reaching the end of the stream.
    pub fn load<R: Read + Seek>(&self, mut source: R, list: &mut ColorList) -> Result<LoadReport> {
        let start = source.stream_position()?;
        let len = source.seek(SeekFrom::End(0))?;
        source.seek(SeekFrom::Start(start))?;

        let mut state = LoadState::default();
        let mut buffer = Vec::new();
        let mut offset = start;

        let end = loop {
            let remaining = len.saturating_sub(offset);
            if remaining == 0 {
                break ScanEnd::EndOfStream;
            }

            let mut raw = [0u8; ChunkHeader::SIZE];
            if remaining < ChunkHeader::SIZE as u64 || !read_or_eof(&mut source, &mut raw)? {
                break ScanEnd::TruncatedHeader { offset };
            }

            let Ok(header) = ChunkHeader::from_bytes(&raw) else {
                tracing::warn!(offset, "Chunk tag is not zero-terminated, stopping scan");
                break ScanEnd::CorruptHeader { offset };
            };

            let size = header.size();
            let body_offset = offset + ChunkHeader::SIZE as u64;
            let available = len - body_offset;
            let tag_name = String::from_utf8_lossy(header.tag_bytes()).into_owned();

            tracing::debug!(tag = %tag_name, size, offset, "Read chunk header");

            let body_len = match header.tag() {
                Some(ChunkTag::ColorActions) | None => None,
                Some(_) if size > self.config.max_chunk_size => {
                    tracing::warn!(tag = %tag_name, size, "Chunk exceeds size limit, skipping");
                    state.warnings.push(LoadWarning::OversizedChunk { tag: tag_name.clone(), size });
                    None
                },
                Some(_) => usize::try_from(size).ok(),
            };

            let Some(body_len) = body_len else {
                if size > available {
                    tracing::warn!(tag = %tag_name, size, available, "Chunk skip runs past end");
                    break ScanEnd::SkipPastEnd { tag: tag_name, offset };
                }
                source.seek(SeekFrom::Start(body_offset + size))?;
                offset = body_offset + size;
                continue;
            };

            if size > available {
                tracing::warn!(tag = %tag_name, size, available, "Chunk body truncated");
                break ScanEnd::TruncatedBody { tag: tag_name, offset };
            }

            buffer.clear();
            buffer.resize(body_len, 0);
            if !read_or_eof(&mut source, &mut buffer)? {
                break ScanEnd::TruncatedBody { tag: tag_name, offset };
            }

            match header.tag() {
                Some(ChunkTag::Version) => state.on_version(&buffer),
                Some(ChunkTag::HandlerMap) => state.on_handler_map(&self.codec, list, &buffer),
                Some(ChunkTag::ColorList) => state.on_color_list(&self.codec, &buffer),
                Some(ChunkTag::ColorPositions) => state.on_positions(&buffer, list),
                Some(ChunkTag::ColorActions) | None => {},
            }

            offset = body_offset + size;
        };

        state.flush_unpositioned(list);

        tracing::debug!(
            entries = state.loaded,
            warnings = state.warnings.len(),
            end = ?end,
            "Palette scan finished"
        );

        Ok(LoadReport {
            version: state.version,
            end,
            warnings: state.warnings,
            entries_loaded: state.loaded,
        })
    }
}

/// Per-load scan state; dropped when the load returns
#[derive(Default)]
struct LoadState {
    handlers: HandlerTable,
    pending: Vec<ColorEntry>,
    version: Option<FormatVersion>,
    warnings: Vec<LoadWarning>,
    loaded: usize,
}

impl LoadState {
    fn on_version(&mut self, body: &[u8]) {
        match FormatVersion::from_bytes(body) {
            Ok(version) => {
                if version.major > FormatVersion::CURRENT.major {
                    tracing::warn!(%version, "Palette written by a newer format version");
                    self.warnings.push(LoadWarning::NewerVersion(version));
                }
                self.version = Some(version);
            },
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable version chunk");
                self.warnings.push(LoadWarning::UnreadableVersion);
            },
        }
    }

    fn on_handler_map<C: RecordCodec>(&mut self, codec: &C, list: &ColorList, body: &[u8]) {
        self.handlers = match handler_map::read(codec, list, body) {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable handler map");
                self.warnings.push(LoadWarning::UnreadableHandlerMap(e.to_string()));
                HandlerTable::default()
            },
        };
    }

    fn on_color_list<C: RecordCodec>(&mut self, codec: &C, body: &[u8]) {
        let mut src = body;
        let mut decoded = 0;

        loop {
            match codec.read_record(&self.handlers, &mut src) {
                Ok(Some(record)) => {
                    let entry = ColorEntry::from_record(&record);
                    tracing::trace!(name = %entry.name, "Decoded color entry");
                    self.pending.push(entry);
                    decoded += 1;
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(decoded, error = %e, "Color list stopped at undecodable record");
                    self.warnings
                        .push(LoadWarning::RecordsStopped { decoded, reason: e.to_string() });
                    break;
                },
            }
        }
    }

    fn on_positions(&mut self, body: &[u8], list: &mut ColorList) {
        let expected = self.pending.len();
        let assigned = resolver::assign_positions(&mut self.pending, body);

        if assigned < expected {
            tracing::warn!(expected, assigned, "Positions chunk shorter than entry list");
            self.warnings.push(LoadWarning::PositionShortfall { expected, assigned });
        }

        self.move_pending(list);
    }

    fn flush_unpositioned(&mut self, list: &mut ColorList) {
        if self.pending.is_empty() {
            return;
        }

        tracing::warn!(entries = self.pending.len(), "Entries without a positions chunk");
        self.warnings.push(LoadWarning::UnpositionedEntries(self.pending.len()));
        self.move_pending(list);
    }

    fn move_pending(&mut self, list: &mut ColorList) {
        resolver::resolve(&mut self.pending);

        for entry in self.pending.drain(..) {
            let visible = entry.is_visible();
            list.add(entry, visible);
            self.loaded += 1;
        }
    }
}

/// `read_exact` that reports end of stream as `false` instead of an error
fn read_or_eof<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<bool> {
    match source.read_exact(buf) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use gpa_proto::Chunk;

    use super::*;
    use crate::{Color, PaletteWriter, resolver::HIDDEN_POSITION};

    fn chunk(tag: ChunkTag, body: Vec<u8>) -> Vec<u8> {
        let mut wire = Vec::new();
        Chunk::tagged(tag, body).encode(&mut wire);
        wire
    }

    fn saved(list: &ColorList) -> Vec<u8> {
        PaletteWriter::new().to_bytes(list).expect("save")
    }

    fn sample() -> ColorList {
        let mut list = ColorList::new();
        list.push(ColorEntry::new("Red", Color::from_rgb8(255, 0, 0)));
        list.push(ColorEntry::new("Hidden", Color::from_rgb8(0, 0, 0)).hidden());
        list.push(ColorEntry::new("Blue", Color::from_rgb8(0, 0, 255)));
        list
    }

    #[test]
    fn empty_stream() {
        let mut list = ColorList::new();
        let report = PaletteReader::new().load_bytes(&[], &mut list).expect("load");

        assert_eq!(report.end, ScanEnd::EndOfStream);
        assert_eq!(report.version, None);
        assert!(list.is_empty());
    }

    #[test]
    fn loads_saved_palette() {
        let mut list = ColorList::new();
        let report = PaletteReader::new().load_bytes(&saved(&sample()), &mut list).expect("load");

        assert!(report.is_complete());
        assert_eq!(report.version, Some(FormatVersion::CURRENT));
        assert_eq!(report.entries_loaded, 3);

        let names: Vec<_> = list.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Red", "Blue", "Hidden"]);
        assert!(!list.entries()[2].is_visible());
        assert_eq!(list.entries()[2].position(), Some(HIDDEN_POSITION));
    }

    #[test]
    fn corrupt_header_stops_scan() {
        let mut wire = chunk(ChunkTag::Version, FormatVersion::CURRENT.to_bytes().to_vec());
        let mut bad = [0xAAu8; ChunkHeader::SIZE];
        bad[16..].copy_from_slice(&0u64.to_le_bytes());
        wire.extend_from_slice(&bad);

        let mut list = ColorList::new();
        let report = PaletteReader::new().load_bytes(&wire, &mut list).expect("load");

        assert_eq!(report.version, Some(FormatVersion::CURRENT));
        assert_eq!(report.end, ScanEnd::CorruptHeader { offset: 28 });
    }

    #[test]
    fn partial_header_is_truncation() {
        let mut wire = chunk(ChunkTag::Version, FormatVersion::CURRENT.to_bytes().to_vec());
        wire.extend_from_slice(b"color_li");

        let mut list = ColorList::new();
        let report = PaletteReader::new().load_bytes(&wire, &mut list).expect("load");
        assert_eq!(report.end, ScanEnd::TruncatedHeader { offset: 28 });
    }

    #[test]
    fn unknown_chunk_past_end() {
        let mut wire = ChunkHeader::new(b"thumbnail", u64::MAX).to_bytes().to_vec();
        wire.extend_from_slice(&[1, 2, 3]);

        let mut list = ColorList::new();
        let report = PaletteReader::new().load_bytes(&wire, &mut list).expect("load");
        assert_eq!(report.end, ScanEnd::SkipPastEnd { tag: "thumbnail".into(), offset: 0 });
    }

    #[test]
    fn huge_known_chunk_is_not_allocated() {
        let wire = ChunkHeader::for_tag(ChunkTag::ColorList, u64::MAX).to_bytes();

        let mut list = ColorList::new();
        let report = PaletteReader::new().load_bytes(&wire, &mut list).expect("load");

        assert_eq!(report.end, ScanEnd::SkipPastEnd { tag: "color_list".into(), offset: 0 });
        assert_eq!(
            report.warnings,
            vec![LoadWarning::OversizedChunk { tag: "color_list".into(), size: u64::MAX }]
        );
    }

    #[test]
    fn oversized_chunk_is_skipped() {
        let mut wire = chunk(ChunkTag::Version, vec![0u8; 64]);
        wire.extend(chunk(ChunkTag::Version, FormatVersion::new(1, 2).to_bytes().to_vec()));

        let reader = PaletteReader::new().with_config(ReaderConfig { max_chunk_size: 16 });
        let mut list = ColorList::new();
        let report = reader.load_bytes(&wire, &mut list).expect("load");

        assert_eq!(report.end, ScanEnd::EndOfStream);
        assert_eq!(report.version, Some(FormatVersion::new(1, 2)));
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn short_version_is_not_fatal() {
        let mut wire = chunk(ChunkTag::Version, vec![1, 0]);
        wire.extend(chunk(ChunkTag::ColorPositions, Vec::new()));

        let mut list = ColorList::new();
        let report = PaletteReader::new().load_bytes(&wire, &mut list).expect("load");

        assert_eq!(report.version, None);
        assert_eq!(report.warnings, vec![LoadWarning::UnreadableVersion]);
        assert_eq!(report.end, ScanEnd::EndOfStream);
    }

    #[test]
    fn newer_major_version_is_reported() {
        let wire = chunk(ChunkTag::Version, FormatVersion::new(2, 0).to_bytes().to_vec());

        let mut list = ColorList::new();
        let report = PaletteReader::new().load_bytes(&wire, &mut list).expect("load");

        assert_eq!(report.version, Some(FormatVersion::new(2, 0)));
        assert_eq!(report.warnings, vec![LoadWarning::NewerVersion(FormatVersion::new(2, 0))]);
    }

    #[test]
    fn color_list_without_handler_map_stops() {
        // drop the handler map chunk from a saved file
        let wire = saved(&sample());
        let version_len = ChunkHeader::SIZE + FormatVersion::SIZE;
        let map = Chunk::decode(&wire[version_len..]).expect("handler map");
        assert_eq!(map.header.tag(), Some(ChunkTag::HandlerMap));

        let mut stripped = wire[..version_len].to_vec();
        stripped.extend_from_slice(&wire[version_len + map.encoded_len()..]);

        let mut list = ColorList::new();
        let report = PaletteReader::new().load_bytes(&stripped, &mut list).expect("load");

        assert!(list.is_empty());
        assert_eq!(report.end, ScanEnd::EndOfStream);
        assert!(matches!(
            report.warnings.as_slice(),
            [LoadWarning::RecordsStopped { decoded: 0, .. }]
        ));
    }

    #[test]
    fn unreadable_handler_map_stops_color_list() {
        // replace the handler map body with bytes that are not a CBOR array
        let wire = saved(&sample());
        let version_len = ChunkHeader::SIZE + FormatVersion::SIZE;
        let map = Chunk::decode(&wire[version_len..]).expect("handler map");

        let mut damaged = wire[..version_len].to_vec();
        damaged.extend_from_slice(&chunk(ChunkTag::HandlerMap, vec![0xFF, 0x00, 0x13]));
        damaged.extend_from_slice(&wire[version_len + map.encoded_len()..]);

        let mut list = ColorList::new();
        let report = PaletteReader::new().load_bytes(&damaged, &mut list).expect("load");

        assert!(list.is_empty());
        assert_eq!(report.entries_loaded, 0);
        assert_eq!(report.end, ScanEnd::EndOfStream);
        assert!(matches!(
            report.warnings.as_slice(),
            [LoadWarning::UnreadableHandlerMap(_), LoadWarning::RecordsStopped { decoded: 0, .. }]
        ));
    }

    #[test]
    fn entries_without_positions_are_kept() {
        let wire = saved(&sample());
        let positions_len = ChunkHeader::SIZE + 3 * resolver::POSITION_SIZE;
        let cut = &wire[..wire.len() - positions_len];

        let mut list = ColorList::new();
        let report = PaletteReader::new().load_bytes(cut, &mut list).expect("load");

        assert_eq!(report.end, ScanEnd::EndOfStream);
        assert_eq!(report.warnings, vec![LoadWarning::UnpositionedEntries(3)]);

        let names: Vec<_> = list.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Red", "Hidden", "Blue"]);
        assert!(list.iter().all(ColorEntry::is_visible));
    }

    #[test]
    fn position_shortfall_is_reported() {
        let wire = saved(&sample());
        let positions_len = ChunkHeader::SIZE + 3 * resolver::POSITION_SIZE;
        let mut cut = wire[..wire.len() - positions_len].to_vec();
        cut.extend(chunk(ChunkTag::ColorPositions, [1u32, 0].map(u32::to_le_bytes).concat()));

        let mut list = ColorList::new();
        let report = PaletteReader::new().load_bytes(&cut, &mut list).expect("load");

        assert_eq!(report.warnings, vec![LoadWarning::PositionShortfall { expected: 3, assigned: 2 }]);
        let names: Vec<_> = list.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Hidden", "Red", "Blue"]);
        assert_eq!(list.entries()[2].position(), None);
    }

    #[test]
    fn load_appends_to_existing_entries() {
        let mut list = ColorList::new();
        list.push(ColorEntry::new("Existing", Color::UNSET));

        PaletteReader::new().load_bytes(&saved(&sample()), &mut list).expect("load");
        assert_eq!(list.len(), 4);
        assert_eq!(list.entries()[0].name, "Existing");
    }

    #[test]
    fn load_starts_at_stream_position() {
        let mut wire = vec![0xEE; 5];
        wire.extend(saved(&sample()));

        let mut cursor = Cursor::new(wire);
        cursor.set_position(5);

        let mut list = ColorList::new();
        let report = PaletteReader::new().load(cursor, &mut list).expect("load");
        assert!(report.is_complete());
        assert_eq!(list.len(), 3);
    }
}
