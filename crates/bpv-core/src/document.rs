//! # Document Value Model
//!
//! Documents are JSON objects produced by an external body parser. The
//! validator reads them through the [`FieldValue`] tagged model so that an
//! absent field is an explicit variant instead of an implicit `undefined`.

use serde_json::{Map, Value};

use crate::path::FieldPath;

/// A parsed request document: a JSON object with string keys.
pub type Document = Map<String, Value>;

/// The value found at a field path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// No value: a segment was missing, an intermediate value was not a
    /// mapping, or the value is JSON `null`.
    Absent,
    /// A string value.
    Text(&'a str),
    /// A nested mapping.
    Mapping(&'a Map<String, Value>),
    /// Any other JSON value (number, boolean, array).
    Other(&'a Value),
}

impl<'a> FieldValue<'a> {
    /// Classify a JSON value.
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::Null => FieldValue::Absent,
            Value::String(s) => FieldValue::Text(s),
            Value::Object(map) => FieldValue::Mapping(map),
            other => FieldValue::Other(other),
        }
    }

    /// Whether the field was not supplied.
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// The string content, if this is a [`FieldValue::Text`].
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Walk `path` through `document`, one segment at a time.
///
/// Descends only while the current value is a mapping that owns the next
/// segment as a key; any other situation yields [`FieldValue::Absent`].
/// Total and side-effect free.
pub fn resolve_path<'a>(document: &'a Document, path: &FieldPath) -> FieldValue<'a> {
    let mut current = FieldValue::Mapping(document);
    for segment in path.segments() {
        current = match current {
            FieldValue::Mapping(map) => match map.get(segment) {
                Some(value) => FieldValue::from_value(value),
                None => return FieldValue::Absent,
            },
            _ => return FieldValue::Absent,
        };
    }
    current
}
