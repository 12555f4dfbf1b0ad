//! GPA palette file reader and writer
//!
//! This crate loads and saves palettes: ordered lists of named colors, some
//! of which may be hidden. Files use the chunk framing from `gpa-proto`;
//! entry bodies use a self-describing key/typed-value record codec.
//!
//! # Architecture
//!
//! ```text
//!   ColorList ──► PaletteWriter ──► [version][handler_map][color_list][color_positions]
//!                     │  ▲                        │
//!                     ▼  │                        ▼
//!                  RecordCodec ◄──────────── PaletteReader ──► ColorList
//! ```
//!
//! - The writer streams codec output straight into a seekable sink and
//!   backpatches chunk sizes afterwards.
//! - The reader buffers one chunk at a time, skips anything it does not know,
//!   and never fails on malformed content once the source is open.
//! - Hidden entries are stored with the [`HIDDEN_POSITION`] sentinel, not
//!   dropped.
//!
//! # Modules
//!
//! - [`dynv`]: typed records, handler maps, the [`RecordCodec`] capability
//! - [`palette`]: [`ColorEntry`] and [`ColorList`]
//! - [`reader`] / [`writer`]: chunk scanning and emission
//! - [`resolver`]: position and visibility reconciliation
//! - [`report`]: load diagnostics
//! - [`error`]: error types
//!
//! [`RecordCodec`]: dynv::RecordCodec

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod color;
pub mod config;
pub mod dynv;
pub mod error;
pub mod file;
pub mod handler_map;
pub mod palette;
pub mod reader;
pub mod report;
pub mod resolver;
pub mod writer;

pub use color::Color;
pub use config::{ReaderConfig, WriterConfig};
pub use error::{PaletteError, Result};
pub use file::{load_file, save_file};
pub use palette::{ColorEntry, ColorList};
pub use reader::PaletteReader;
pub use report::{LoadReport, LoadWarning, ScanEnd};
pub use resolver::HIDDEN_POSITION;
pub use writer::PaletteWriter;
