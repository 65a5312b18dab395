//! # Custom Extractors
//!
//! Helpers that turn raw Axum extractor results into validator inputs:
//! a JSON object [`Document`] and a header lookup for out-of-band
//! identifiers.

use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum::Json;
use bpv_core::{Document, IdentifierLookup};
use serde_json::Value;

use crate::error::AppError;

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
///
/// Handlers take `Result<Json<T>, JsonRejection>` so the rejection is
/// reported in the API's own error format.
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body that must be an object.
pub fn extract_document(result: Result<Json<Value>, JsonRejection>) -> Result<Document, AppError> {
    match extract_json(result)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::BadRequest(format!(
            "request body must be a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Request headers as an identifier source. Lookups are case-insensitive;
/// values that are not visible ASCII are treated as absent.
#[derive(Debug, Clone, Copy)]
pub struct RequestHeaders<'a>(pub &'a HeaderMap);

impl IdentifierLookup for RequestHeaders<'_> {
    fn header(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|value| value.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn document_accepts_objects() {
        let doc = extract_document(Ok(Json(serde_json::json!({"id": "u1"})))).unwrap();
        assert_eq!(doc.get("id"), Some(&Value::String("u1".into())));
    }

    #[test]
    fn document_rejects_non_objects() {
        for (value, name) in [
            (serde_json::json!([1, 2]), "array"),
            (serde_json::json!("text"), "string"),
            (Value::Null, "null"),
        ] {
            match extract_document(Ok(Json(value))) {
                Err(AppError::BadRequest(msg)) => assert!(msg.contains(name), "{msg}"),
                other => panic!("expected BadRequest, got {other:?}"),
            }
        }
    }

    #[test]
    fn header_lookup_ignores_case() {
        let mut headers = HeaderMap::new();
        headers.insert("productid", HeaderValue::from_static("p1"));
        let lookup = RequestHeaders(&headers);
        assert_eq!(lookup.header("productId"), Some("p1"));
        assert_eq!(lookup.header("PRODUCTID"), Some("p1"));
        assert_eq!(lookup.header("userId"), None);
    }

    #[test]
    fn header_lookup_invalid_name_is_absent() {
        let headers = HeaderMap::new();
        assert_eq!(RequestHeaders(&headers).header("not a header"), None);
    }
}
