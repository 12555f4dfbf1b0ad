//! Handler map chunk gateway.
//!
//! Thin pass-through between the palette chunks and the record codec: the
//! writer advertises the registry attached to the list being saved, and the
//! reader rebuilds a [`HandlerTable`] against the registry of the list being
//! filled.

use std::io::Write;

use crate::{
    ColorList,
    dynv::{HandlerTable, RecordCodec, RecordError},
};

/// Serialize the handlers `list` needs into `dst`
///
/// # Errors
///
/// Propagates the codec's encoding error.
pub fn write<C: RecordCodec, W: Write>(
    codec: &C,
    list: &ColorList,
    dst: &mut W,
) -> Result<(), RecordError> {
    codec.write_handlers(list.handlers(), dst)
}

/// Rebuild the handler table from a handler map chunk body
///
/// Type names the destination list's registry does not contain resolve to
/// `None`, so records using them stop decoding instead of being misread.
///
/// # Errors
///
/// Propagates the codec's decoding error.
pub fn read<C: RecordCodec>(
    codec: &C,
    list: &ColorList,
    body: &[u8],
) -> Result<HandlerTable, RecordError> {
    let table = codec.read_handlers(list.handlers(), body)?;

    if table.unknown_count() > 0 {
        tracing::debug!(
            handlers = table.len(),
            unknown = table.unknown_count(),
            "Handler map names types this build cannot decode"
        );
    }

    Ok(table)
}
