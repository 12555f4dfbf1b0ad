//! Snapshot tests for on-disk format stability.
//!
//! These tests pin the exact bytes of palette files and chunk headers. If the
//! layout changes, these tests fail, so older readers are never broken by
//! accident.

use gpa_core::{ColorList, PaletteWriter};
use gpa_proto::{Chunk, ChunkHeader, ChunkTag, FormatVersion};
use insta::assert_snapshot;

/// Encode a palette to a hex string for snapshot
fn palette_to_hex(list: &ColorList) -> String {
    let bytes = PaletteWriter::new().to_bytes(list).expect("saving should succeed");
    hex::encode(bytes)
}

#[test]
fn snapshot_empty_palette() {
    assert_snapshot!(palette_to_hex(&ColorList::new()));
}

#[test]
fn snapshot_positions_header() {
    let header = ChunkHeader::for_tag(ChunkTag::ColorPositions, 12);
    assert_snapshot!(hex::encode(header.to_bytes()));
}

#[test]
fn snapshot_version_chunk() {
    let mut wire = Vec::new();
    Chunk::tagged(ChunkTag::Version, FormatVersion::CURRENT.to_bytes().to_vec()).encode(&mut wire);
    assert_snapshot!(hex::encode(wire));
}
