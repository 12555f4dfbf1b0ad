//! Dynamic key/typed-value records.
//!
//! Palette entries are not stored as fixed structs. Each entry is written as
//! a [`Record`]: a set of named fields, each tagged with the handler (value
//! type) that encodes it. A file carries its own handler map so readers can
//! tell which type every field index refers to.
//!
//! # Modules
//!
//! - [`handlers`]: [`HandlerMap`] registry and per-file [`HandlerTable`]
//! - [`codec`]: [`RecordCodec`] capability and the CBOR implementation

pub mod codec;
pub mod handlers;

use std::collections::BTreeMap;

pub use codec::{CborCodec, RecordCodec, RecordError};
pub use handlers::{HandlerMap, HandlerTable};

use crate::Color;

/// Value types a handler can encode
///
/// The wire name (see [`ValueType::name`]) is what gets persisted in the
/// handler map, never the enum discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    /// UTF-8 text
    String,
    /// Signed 32-bit integer
    Int32,
    /// 32-bit float
    Float,
    /// Boolean
    Bool,
    /// RGBA [`Color`]
    Color,
}

impl ValueType {
    /// Built-in types, in registry order
    pub const BUILTIN: [Self; 5] = [Self::String, Self::Int32, Self::Float, Self::Bool, Self::Color];

    /// Name persisted in the handler map
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int32 => "int32",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Color => "color",
        }
    }

    /// Look up a type by its persisted name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::BUILTIN.into_iter().find(|ty| ty.name() == name)
    }
}

/// A typed value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 text
    String(String),
    /// Signed 32-bit integer
    Int32(i32),
    /// 32-bit float
    Float(f32),
    /// Boolean
    Bool(bool),
    /// RGBA color
    Color(Color),
}

impl Value {
    /// Handler type that encodes this value
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::String(_) => ValueType::String,
            Self::Int32(_) => ValueType::Int32,
            Self::Float(_) => ValueType::Float,
            Self::Bool(_) => ValueType::Bool,
            Self::Color(_) => ValueType::Color,
        }
    }
}

/// Ordered set of named, typed fields
///
/// Keys are kept sorted so the same record always encodes to the same bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value under `key`
    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Set a string field
    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.set(key, Value::String(value.into()));
    }

    /// Set a color field
    pub fn set_color(&mut self, key: impl Into<String>, value: Color) {
        self.set(key, Value::Color(value));
    }

    /// Raw field lookup
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String field, or `default` when missing or of another type
    #[must_use]
    pub fn get_string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.fields.get(key) {
            Some(Value::String(s)) => s,
            _ => default,
        }
    }

    /// Color field, `None` when missing or of another type
    #[must_use]
    pub fn get_color(&self, key: &str) -> Option<Color> {
        match self.fields.get(key) {
            Some(Value::Color(c)) => Some(*c),
            _ => None,
        }
    }

    /// Fields in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
