//! Path-based entry points.

use std::path::Path;

use crate::{ColorList, LoadReport, PaletteReader, PaletteWriter, error::Result};

/// Load the palette at `path` into `list` with default settings
///
/// # Errors
///
/// See [`PaletteReader::load_file`].
pub fn load_file(path: impl AsRef<Path>, list: &mut ColorList) -> Result<LoadReport> {
    PaletteReader::new().load_file(path, list)
}

/// Save `list` to `path` with default settings
///
/// # Errors
///
/// See [`PaletteWriter::save_file`].
pub fn save_file(path: impl AsRef<Path>, list: &ColorList) -> Result<()> {
    PaletteWriter::new().save_file(list, path)
}
