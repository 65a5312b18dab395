//! # Required Identifiers
//!
//! A profile declares the identifiers that must be present before any field
//! rule runs. Each [`IdentifierSpec`] names an [`IdentifierSource`]: a
//! top-level body field or a transport header. Headers are read through the
//! [`IdentifierLookup`] trait so the engine stays independent of any HTTP
//! framework.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::document::Document;

/// Where a required identifier is read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "from", rename_all = "snake_case")]
pub enum IdentifierSource {
    /// A top-level field of the request body.
    Body {
        /// Body field name.
        field: String,
    },
    /// A transport-level header, matched case-insensitively.
    Header {
        /// Header name.
        name: String,
    },
}

impl IdentifierSource {
    /// The field or header name this source reads.
    pub fn key(&self) -> &str {
        match self {
            Self::Body { field } => field,
            Self::Header { name } => name,
        }
    }
}

/// A required identifier and the message reported when it is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierSpec {
    /// Name used when echoing the identifier back (e.g. `userId`).
    pub name: String,
    /// Where the value is read from.
    pub source: IdentifierSource,
    /// Error message when the identifier is missing or empty.
    pub message: String,
}

impl IdentifierSpec {
    /// Identifier read from a top-level body field.
    pub fn body(
        name: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: IdentifierSource::Body {
                field: field.into(),
            },
            message: message.into(),
        }
    }

    /// Identifier read from a transport header.
    pub fn header(
        name: impl Into<String>,
        header: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: IdentifierSource::Header {
                name: header.into(),
            },
            message: message.into(),
        }
    }

    /// Read the identifier's value, or `None` if it is missing or empty.
    ///
    /// Body values must be non-empty strings or non-zero JSON numbers and
    /// keep their JSON type. Header values must be non-empty and are
    /// returned as strings.
    pub fn extract(&self, document: &Document, lookup: &dyn IdentifierLookup) -> Option<Value> {
        match &self.source {
            IdentifierSource::Body { field } => match document.get(field) {
                Some(Value::String(s)) if !s.is_empty() => Some(Value::String(s.clone())),
                Some(Value::Number(n)) if !is_zero(n) => Some(Value::Number(n.clone())),
                _ => None,
            },
            IdentifierSource::Header { name } => lookup
                .header(name)
                .filter(|value| !value.is_empty())
                .map(|value| Value::String(value.to_owned())),
        }
    }
}

fn is_zero(n: &Number) -> bool {
    n.as_f64() == Some(0.0)
}

/// Read access to transport-level values supplied out of band.
pub trait IdentifierLookup {
    /// Value of the named header, if present and valid text.
    fn header(&self, name: &str) -> Option<&str>;
}

/// Lookup with no headers, for callers that only have a body.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHeaders;

impl IdentifierLookup for NoHeaders {
    fn header(&self, _name: &str) -> Option<&str> {
        None
    }
}

/// Owned header pairs, matched case-insensitively.
///
/// Used by the CLI and tests; the HTTP service adapts its own header map.
#[derive(Debug, Clone, Default)]
pub struct StaticHeaders {
    pairs: Vec<(String, String)>,
}

impl StaticHeaders {
    /// Empty header set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header. Earlier values win on duplicate names.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }
}

impl FromIterator<(String, String)> for StaticHeaders {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl IdentifierLookup for StaticHeaders {
    fn header(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("test document must be an object, got {other}"),
        }
    }

    #[test]
    fn body_identifier_string() {
        let spec = IdentifierSpec::body("userId", "id", "missing");
        assert_eq!(
            spec.extract(&doc(json!({"id": "u1"})), &NoHeaders),
            Some(json!("u1"))
        );
    }

    #[test]
    fn body_identifier_missing_or_empty() {
        let spec = IdentifierSpec::body("userId", "id", "missing");
        assert_eq!(spec.extract(&doc(json!({})), &NoHeaders), None);
        assert_eq!(spec.extract(&doc(json!({"id": ""})), &NoHeaders), None);
        assert_eq!(spec.extract(&doc(json!({"id": null})), &NoHeaders), None);
        assert_eq!(spec.extract(&doc(json!({"id": false})), &NoHeaders), None);
        assert_eq!(spec.extract(&doc(json!({"id": {"v": 1}})), &NoHeaders), None);
    }

    #[test]
    fn body_identifier_number_keeps_json_type() {
        let spec = IdentifierSpec::body("userId", "id", "missing");
        assert_eq!(
            spec.extract(&doc(json!({"id": 42})), &NoHeaders),
            Some(json!(42))
        );
        assert_eq!(
            spec.extract(&doc(json!({"id": -7.5})), &NoHeaders),
            Some(json!(-7.5))
        );
    }

    #[test]
    fn body_identifier_zero_is_missing() {
        let spec = IdentifierSpec::body("userId", "id", "missing");
        assert_eq!(spec.extract(&doc(json!({"id": 0})), &NoHeaders), None);
        assert_eq!(spec.extract(&doc(json!({"id": 0.0})), &NoHeaders), None);
    }

    #[test]
    fn body_identifier_whitespace_is_present() {
        let spec = IdentifierSpec::body("userId", "id", "missing");
        assert_eq!(
            spec.extract(&doc(json!({"id": " "})), &NoHeaders),
            Some(json!(" "))
        );
    }

    #[test]
    fn header_identifier_is_case_insensitive() {
        let spec = IdentifierSpec::header("productId", "productId", "missing");
        let headers = StaticHeaders::new().with("PRODUCTID", "p-9");
        assert_eq!(spec.extract(&Document::new(), &headers), Some(json!("p-9")));
    }

    #[test]
    fn header_identifier_missing_or_empty() {
        let spec = IdentifierSpec::header("productId", "productId", "missing");
        assert_eq!(spec.extract(&Document::new(), &NoHeaders), None);
        let empty = StaticHeaders::new().with("productId", "");
        assert_eq!(spec.extract(&Document::new(), &empty), None);
    }

    #[test]
    fn header_source_ignores_body_field() {
        let spec = IdentifierSpec::header("productId", "productId", "missing");
        assert_eq!(spec.extract(&doc(json!({"productId": "p1"})), &NoHeaders), None);
    }

    #[test]
    fn source_serde_shape() {
        let source: IdentifierSource =
            serde_json::from_value(json!({"from": "header", "name": "productId"})).unwrap();
        assert_eq!(source.key(), "productId");
        assert_eq!(
            serde_json::to_value(IdentifierSource::Body { field: "id".into() }).unwrap(),
            json!({"from": "body", "field": "id"})
        );
    }
}
