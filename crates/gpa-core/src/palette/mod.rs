//! In-memory palette: color entries and the list that owns them.

pub mod entry;
pub mod list;

pub use entry::ColorEntry;
pub use list::ColorList;
