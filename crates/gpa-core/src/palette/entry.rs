//! A single named color.

use crate::{Color, dynv::Record, resolver::HIDDEN_POSITION};

/// Record key holding the entry name
pub const NAME_KEY: &str = "name";

/// Record key holding the entry color
pub const COLOR_KEY: &str = "color";

/// Named color with an ordinal position and a visibility flag
///
/// `position` is `None` until a positions chunk (or
/// [`ColorList::normalize_positions`](crate::ColorList::normalize_positions))
/// assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorEntry {
    /// Display name
    pub name: String,
    /// Color value
    pub color: Color,
    position: Option<u32>,
    visible: bool,
}

impl ColorEntry {
    /// Visible entry without a position
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self { name: name.into(), color, position: None, visible: true }
    }

    /// Same entry, hidden
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Assigned position, if any
    #[must_use]
    pub fn position(&self) -> Option<u32> {
        self.position
    }

    /// Assign a position
    pub fn set_position(&mut self, position: u32) {
        self.position = Some(position);
    }

    /// True if the entry is shown in the palette
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Change visibility
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// True if the assigned position is the hidden sentinel
    #[must_use]
    pub fn has_hidden_position(&self) -> bool {
        self.position == Some(HIDDEN_POSITION)
    }

    /// Fields persisted in the color list chunk
    #[must_use]
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.set_string(NAME_KEY, self.name.as_str());
        record.set_color(COLOR_KEY, self.color);
        record
    }

    /// Rebuild an entry from a decoded record
    ///
    /// A missing name becomes empty and a missing color becomes
    /// [`Color::UNSET`]; neither is an error.
    #[must_use]
    pub fn from_record(record: &Record) -> Self {
        let color = record.get_color(COLOR_KEY).unwrap_or_default();
        Self::new(record.get_string_or(NAME_KEY, ""), color)
    }
}
