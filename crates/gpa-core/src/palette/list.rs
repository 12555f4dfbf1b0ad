//! Ordered collection of color entries.

use super::ColorEntry;
use crate::{dynv::HandlerMap, resolver::HIDDEN_POSITION};

/// Insertion-ordered palette
///
/// The list owns its entries and the handler registry used to encode them.
/// Order is collection order; positions are only materialized when the list
/// is saved (see [`ColorList::final_positions`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorList {
    entries: Vec<ColorEntry>,
    handlers: HandlerMap,
}

impl ColorList {
    /// Empty list using the built-in handler registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty list using a custom handler registry
    #[must_use]
    pub fn with_handlers(handlers: HandlerMap) -> Self {
        Self { entries: Vec::new(), handlers }
    }

    /// Handler registry advertised when this list is saved
    #[must_use]
    pub fn handlers(&self) -> &HandlerMap {
        &self.handlers
    }

    /// Append an entry, keeping its visibility flag
    pub fn push(&mut self, entry: ColorEntry) {
        self.entries.push(entry);
    }

    /// Append an entry with the given visibility
    pub fn add(&mut self, mut entry: ColorEntry, visible: bool) {
        entry.set_visible(visible);
        self.entries.push(entry);
    }

    /// Entries in collection order
    #[must_use]
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    /// Iterate entries in collection order
    pub fn iter(&self) -> std::slice::Iter<'_, ColorEntry> {
        self.entries.iter()
    }

    /// Visible entries only, in collection order
    pub fn visible_entries(&self) -> impl Iterator<Item = &ColorEntry> {
        self.entries.iter().filter(|e| e.is_visible())
    }

    /// Number of entries (visible or not)
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the list has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Positions to persist, one per entry in collection order
    ///
    /// Visible entries are ranked `0, 1, 2, ...` in collection order; hidden
    /// entries get [`HIDDEN_POSITION`]. Ranks saturate one below the
    /// sentinel so a visible entry can never be read back as hidden.
    #[must_use]
    pub fn final_positions(&self) -> Vec<u32> {
        let mut next = 0u32;
        self.entries
            .iter()
            .map(|entry| {
                if entry.is_visible() {
                    let rank = next;
                    next = next.saturating_add(1).min(HIDDEN_POSITION - 1);
                    rank
                } else {
                    HIDDEN_POSITION
                }
            })
            .collect()
    }

    /// Store [`ColorList::final_positions`] on the entries
    pub fn normalize_positions(&mut self) {
        let positions = self.final_positions();
        for (entry, position) in self.entries.iter_mut().zip(positions) {
            entry.set_position(position);
        }
    }
}

impl Extend<ColorEntry> for ColorList {
    fn extend<I: IntoIterator<Item = ColorEntry>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<'a> IntoIterator for &'a ColorList {
    type Item = &'a ColorEntry;
    type IntoIter = std::slice::Iter<'a, ColorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn sample() -> ColorList {
        let mut list = ColorList::new();
        list.push(ColorEntry::new("a", Color::UNSET));
        list.add(ColorEntry::new("b", Color::UNSET), false);
        list.push(ColorEntry::new("c", Color::UNSET));
        list.push(ColorEntry::new("d", Color::UNSET).hidden());
        list
    }

    #[test]
    fn hidden_entries_get_sentinel() {
        assert_eq!(sample().final_positions(), vec![0, HIDDEN_POSITION, 1, HIDDEN_POSITION]);
    }

    #[test]
    fn normalize_stores_positions() {
        let mut list = sample();
        list.normalize_positions();

        let positions: Vec<_> = list.iter().map(ColorEntry::position).collect();
        assert_eq!(positions, vec![Some(0), Some(HIDDEN_POSITION), Some(1), Some(HIDDEN_POSITION)]);
    }

    #[test]
    fn visible_entries_skip_hidden() {
        let list = sample();
        let names: Vec<_> = list.visible_entries().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn empty_list_has_no_positions() {
        assert!(ColorList::new().final_positions().is_empty());
    }
}
