//! Position and visibility reconciliation.
//!
//! On disk, visibility is not stored as a flag. Every entry gets a `u32`
//! position in the positions chunk and hidden entries carry
//! [`HIDDEN_POSITION`] instead of a rank. Loading turns that back into an
//! ordered list with visibility flags; saving reads the positions the
//! [`ColorList`](crate::ColorList) assigns.

use crate::{ColorEntry, ColorList};

/// Position value marking an entry as hidden
pub const HIDDEN_POSITION: u32 = u32::MAX;

/// Encoded width of one position
pub const POSITION_SIZE: usize = std::mem::size_of::<u32>();

/// Assign positions from a positions chunk body to `entries`, in order
///
/// Stops at whichever runs out first: entries or whole `u32`s in `body`.
/// Entries past the end of `body` keep their current position. Returns how
/// many entries were assigned.
pub fn assign_positions(entries: &mut [ColorEntry], body: &[u8]) -> usize {
    let positions = body
        .chunks_exact(POSITION_SIZE)
        .filter_map(|raw| <[u8; POSITION_SIZE]>::try_from(raw).ok())
        .map(u32::from_le_bytes);

    let mut assigned = 0;
    for (entry, position) in entries.iter_mut().zip(positions) {
        entry.set_position(position);
        assigned += 1;
    }
    assigned
}

/// Sort entries by position and derive their visibility
///
/// The sort is stable. Entries without a position sort after every
/// positioned entry (hidden ones included) and stay visible, since nothing
/// in the file marked them hidden.
pub fn resolve(entries: &mut [ColorEntry]) {
    entries.sort_by_key(|entry| (entry.position().is_none(), entry.position()));

    for entry in entries {
        let visible = !entry.has_hidden_position();
        entry.set_visible(visible);
    }
}

/// Positions chunk body for `list`: one little-endian `u32` per entry
#[must_use]
pub fn encode_positions(list: &ColorList) -> Vec<u8> {
    list.final_positions().into_iter().flat_map(u32::to_le_bytes).collect()
}
