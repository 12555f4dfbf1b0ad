//! Record codec capability and its CBOR implementation.
//!
//! The palette reader and writer only orchestrate chunk boundaries; the
//! bytes inside the handler map and color list chunks belong to a
//! [`RecordCodec`]. [`CborCodec`] is the implementation used for palette
//! files.
//!
//! # CBOR Layout
//!
//! - Handler map body: array of type names, e.g. `["string", "int32", ...]`.
//!   A field's handler index is its position in this array.
//! - Color list body: a concatenation of records. Each record is an array of
//!   `[key, handler_index, value]` triples. There is no count or separator;
//!   readers decode records until the body runs out or one fails.

use std::io::Write;

use ciborium::Value as Cbor;
use thiserror::Error;

use super::{HandlerMap, HandlerTable, Record, Value, ValueType};
use crate::Color;

/// Errors produced while encoding or decoding records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Underlying CBOR serialization failed
    #[error("failed to encode CBOR: {0}")]
    Encode(String),

    /// Underlying CBOR deserialization failed
    #[error("failed to decode CBOR: {0}")]
    Decode(String),

    /// CBOR was well-formed but not shaped like a record
    #[error("malformed record: {0}")]
    Malformed(&'static str),

    /// Field refers to a handler index the reader cannot resolve
    #[error("unknown handler index: {0}")]
    UnknownHandler(u64),

    /// Field type is missing from the writer's handler map
    #[error("value type {} is not in the handler map", .0.name())]
    UnregisteredType(ValueType),

    /// Field value does not match its declared handler
    #[error("field {key:?} does not hold a {} value", .expected.name())]
    TypeMismatch {
        /// Field key
        key: String,
        /// Type named by the handler index
        expected: ValueType,
    },
}

/// Capability the palette reader and writer drive chunk by chunk
///
/// Implementations decide how handler maps and records look on disk. They
/// never see chunk headers.
pub trait RecordCodec {
    /// Serialize the handler registry into `dst`
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Encode`] if serialization or the write fails.
    fn write_handlers<W: Write>(&self, handlers: &HandlerMap, dst: &mut W)
    -> Result<(), RecordError>;

    /// Rebuild the handler table from a handler map chunk body
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be parsed.
    fn read_handlers(&self, registry: &HandlerMap, body: &[u8])
    -> Result<HandlerTable, RecordError>;

    /// Serialize one record into `dst`
    ///
    /// # Errors
    ///
    /// Returns an error if a field type is not in `handlers` or the write
    /// fails.
    fn write_record<W: Write>(
        &self,
        handlers: &HandlerMap,
        record: &Record,
        dst: &mut W,
    ) -> Result<(), RecordError>;

    /// Decode the next record from the front of `src`, advancing it
    ///
    /// Returns `Ok(None)` once `src` is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the next record cannot be decoded with `handlers`.
    /// `src` may have been partially consumed.
    fn read_record(
        &self,
        handlers: &HandlerTable,
        src: &mut &[u8],
    ) -> Result<Option<Record>, RecordError>;
}

/// CBOR record codec backed by `ciborium`
#[derive(Debug, Clone, Copy, Default)]
pub struct CborCodec;

impl CborCodec {
    fn encode_value(value: &Value) -> Result<Cbor, RecordError> {
        Ok(match value {
            Value::String(s) => Cbor::Text(s.clone()),
            Value::Int32(i) => Cbor::Integer((*i).into()),
            Value::Float(f) => Cbor::Float(f64::from(*f)),
            Value::Bool(b) => Cbor::Bool(*b),
            Value::Color(c) => {
                Cbor::serialized(c).map_err(|e| RecordError::Encode(e.to_string()))?
            },
        })
    }

    fn decode_value(key: &str, ty: ValueType, raw: Cbor) -> Result<Value, RecordError> {
        let mismatch = || RecordError::TypeMismatch { key: key.to_string(), expected: ty };

        match ty {
            ValueType::String => raw.into_text().map(Value::String).map_err(|_| mismatch()),
            ValueType::Int32 => raw
                .as_integer()
                .and_then(|i| i32::try_from(i).ok())
                .map(Value::Int32)
                .ok_or_else(mismatch),
            // written from an f32, so narrowing is exact
            #[allow(clippy::cast_possible_truncation)]
            ValueType::Float => raw.as_float().map(|f| Value::Float(f as f32)).ok_or_else(mismatch),
            ValueType::Bool => raw.as_bool().map(Value::Bool).ok_or_else(mismatch),
            ValueType::Color => {
                raw.deserialized::<Color>().map(Value::Color).map_err(|_| mismatch())
            },
        }
    }
}

impl RecordCodec for CborCodec {
    fn write_handlers<W: Write>(
        &self,
        handlers: &HandlerMap,
        dst: &mut W,
    ) -> Result<(), RecordError> {
        let names: Vec<&str> = handlers.types().iter().map(|ty| ty.name()).collect();
        ciborium::ser::into_writer(&names, dst).map_err(|e| RecordError::Encode(e.to_string()))
    }

    fn read_handlers(
        &self,
        registry: &HandlerMap,
        body: &[u8],
    ) -> Result<HandlerTable, RecordError> {
        let names: Vec<String> =
            ciborium::de::from_reader(body).map_err(|e| RecordError::Decode(e.to_string()))?;
        Ok(HandlerTable::from_names(registry, names.iter().map(String::as_str)))
    }

    fn write_record<W: Write>(
        &self,
        handlers: &HandlerMap,
        record: &Record,
        dst: &mut W,
    ) -> Result<(), RecordError> {
        let fields = record
            .iter()
            .map(|(key, value)| {
                let ty = value.value_type();
                let index = handlers.index_of(ty).ok_or(RecordError::UnregisteredType(ty))?;
                Ok(Cbor::Array(vec![
                    Cbor::Text(key.to_string()),
                    Cbor::Integer(index.into()),
                    Self::encode_value(value)?,
                ]))
            })
            .collect::<Result<Vec<_>, RecordError>>()?;

        ciborium::ser::into_writer(&Cbor::Array(fields), dst)
            .map_err(|e| RecordError::Encode(e.to_string()))
    }

    fn read_record(
        &self,
        handlers: &HandlerTable,
        src: &mut &[u8],
    ) -> Result<Option<Record>, RecordError> {
        if src.is_empty() {
            return Ok(None);
        }

        let raw: Cbor =
            ciborium::de::from_reader(&mut *src).map_err(|e| RecordError::Decode(e.to_string()))?;
        let Cbor::Array(fields) = raw else {
            return Err(RecordError::Malformed("record is not an array"));
        };

        let mut record = Record::new();
        for field in fields {
            let Cbor::Array(parts) = field else {
                return Err(RecordError::Malformed("field is not an array"));
            };
            let [key, index, raw]: [Cbor; 3] =
                parts.try_into().map_err(|_| RecordError::Malformed("field is not a triple"))?;

            let key = key.into_text().map_err(|_| RecordError::Malformed("field key is not text"))?;
            let index = index
                .as_integer()
                .and_then(|i| u64::try_from(i).ok())
                .ok_or(RecordError::Malformed("handler index is not an unsigned integer"))?;
            let ty = handlers.resolve(index).ok_or(RecordError::UnknownHandler(index))?;

            let value = Self::decode_value(&key, ty, raw)?;
            record.set(key, value);
        }

        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        let mut record = Record::new();
        record.set_string("name", "Red");
        record.set_color("color", Color::from_rgb8(255, 0, 0));
        record.set("weight", Value::Float(0.25));
        record.set("pinned", Value::Bool(true));
        record.set("group", Value::Int32(-3));
        record
    }

    #[test]
    fn handler_map_hex() {
        let mut buf = Vec::new();
        CborCodec.write_handlers(&HandlerMap::default(), &mut buf).expect("encode");

        // array(5) of text: string, int32, float, bool, color
        assert_eq!(
            hex::encode(&buf),
            "8566737472696e6765696e74333265666c6f617464626f6f6c65636f6c6f72"
        );
    }

    #[test]
    fn handler_map_round_trip() {
        let registry = HandlerMap::default();
        let mut buf = Vec::new();
        CborCodec.write_handlers(&registry, &mut buf).expect("encode");

        let table = CborCodec.read_handlers(&registry, &buf).expect("decode");
        assert_eq!(table, HandlerTable::identity(&registry));
    }

    #[test]
    fn reject_garbage_handler_map() {
        let result = CborCodec.read_handlers(&HandlerMap::default(), &[0xFF, 0x00]);
        assert!(matches!(result, Err(RecordError::Decode(_))));
    }

    #[test]
    fn records_decode_in_sequence() {
        let registry = HandlerMap::default();
        let table = HandlerTable::identity(&registry);

        let mut second = Record::new();
        second.set_string("name", "Second");

        let mut buf = Vec::new();
        CborCodec.write_record(&registry, &sample_record(), &mut buf).expect("encode");
        CborCodec.write_record(&registry, &second, &mut buf).expect("encode");

        let mut src = buf.as_slice();
        assert_eq!(CborCodec.read_record(&table, &mut src), Ok(Some(sample_record())));
        assert_eq!(CborCodec.read_record(&table, &mut src), Ok(Some(second)));
        assert_eq!(CborCodec.read_record(&table, &mut src), Ok(None));
    }

    #[test]
    fn empty_handler_table_stops_record() {
        let registry = HandlerMap::default();
        let mut buf = Vec::new();
        CborCodec.write_record(&registry, &sample_record(), &mut buf).expect("encode");

        let mut src = buf.as_slice();
        let result = CborCodec.read_record(&HandlerTable::default(), &mut src);
        assert!(matches!(result, Err(RecordError::UnknownHandler(_))));
    }

    #[test]
    fn reader_maps_indices_by_name() {
        // writer registry in a different order than the reader's
        let writer = HandlerMap::new([ValueType::Color, ValueType::String]);
        let reader = HandlerMap::default();

        let mut map = Vec::new();
        CborCodec.write_handlers(&writer, &mut map).expect("encode");
        let table = CborCodec.read_handlers(&reader, &map).expect("decode");

        let mut record = Record::new();
        record.set_string("name", "Teal");
        record.set_color("color", Color::rgb(0.0, 0.5, 0.5));

        let mut buf = Vec::new();
        CborCodec.write_record(&writer, &record, &mut buf).expect("encode");

        let mut src = buf.as_slice();
        assert_eq!(CborCodec.read_record(&table, &mut src), Ok(Some(record)));
    }

    #[test]
    fn unregistered_type_fails_to_encode() {
        let registry = HandlerMap::new([ValueType::String]);
        let mut buf = Vec::new();

        let result = CborCodec.write_record(&registry, &sample_record(), &mut buf);
        assert!(matches!(result, Err(RecordError::UnregisteredType(_))));
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let registry = HandlerMap::default();
        let table = HandlerTable::identity(&registry);

        // ["name", 4 (color), "not a color"]
        let raw = Cbor::Array(vec![Cbor::Array(vec![
            Cbor::Text("name".into()),
            Cbor::Integer(4u32.into()),
            Cbor::Text("not a color".into()),
        ])]);
        let mut buf = Vec::new();
        ciborium::ser::into_writer(&raw, &mut buf).expect("encode");

        let mut src = buf.as_slice();
        assert_eq!(
            CborCodec.read_record(&table, &mut src),
            Err(RecordError::TypeMismatch { key: "name".into(), expected: ValueType::Color })
        );
    }

    #[test]
    fn truncated_record_fails() {
        let registry = HandlerMap::default();
        let mut buf = Vec::new();
        CborCodec.write_record(&registry, &sample_record(), &mut buf).expect("encode");
        buf.truncate(buf.len() - 3);

        let mut src = buf.as_slice();
        let result = CborCodec.read_record(&HandlerTable::identity(&registry), &mut src);
        assert!(matches!(result, Err(RecordError::Decode(_))));
    }
}
