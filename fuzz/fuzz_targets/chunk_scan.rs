//! Scan arbitrary bytes as a palette file
//!
//! Loading must never panic or return an error for in-memory input: every
//! malformed header, body, or record ends the scan and is reported in the
//! load report. The first bytes are also fed to the single-chunk decoder.

#![no_main]

use gpa_core::{ColorList, PaletteReader, PaletteWriter, ReaderConfig};
use gpa_proto::{Chunk, ChunkHeader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // INVARIANT 1: chunk decoding either fails cleanly or consumes a prefix
    if let Ok(chunk) = Chunk::decode(data) {
        assert!(chunk.encoded_len() <= data.len());
        assert_eq!(chunk.body.len() as u64, chunk.header.size());
        assert_eq!(chunk.header.tag_field()[ChunkHeader::TAG_LEN - 1], 0);
    }

    // INVARIANT 2: in-memory loads always succeed
    let reader = PaletteReader::new().with_config(ReaderConfig { max_chunk_size: 1 << 20 });
    let mut list = ColorList::new();
    let report = reader.load_bytes(data, &mut list).expect("in-memory load never fails");
    assert_eq!(report.entries_loaded, list.len());

    // INVARIANT 3: whatever was loaded can be saved and loaded again
    let wire = PaletteWriter::new().to_bytes(&list).expect("loaded entries re-encode");
    let mut again = ColorList::new();
    let report = PaletteReader::new().load_bytes(&wire, &mut again).expect("reload");
    assert!(report.is_complete());
    assert_eq!(again.len(), list.len());
});
