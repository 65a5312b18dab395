//! # Validation Verdicts
//!
//! The outcome of validating one document: pass/fail, the ordered error
//! messages, and the required identifiers that were found. Produced per
//! request and never persisted.

use serde::Serialize;
use serde_json::{Map, Value};

/// A required identifier that was present in the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedIdentifier {
    /// Identifier name from the profile (e.g. `userId`).
    pub name: String,
    /// The extracted value, echoed with its JSON type.
    pub value: Value,
}

/// Coarse classification of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    /// Every identifier present, every present field passed.
    Passed,
    /// A required identifier was missing; field rules did not run.
    MissingIdentifier,
    /// One or more present fields failed their checks.
    FieldFailures,
}

/// Validation outcome for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationVerdict {
    /// `true` iff `errors` is empty.
    pub ok: bool,
    /// Error messages in rule-table order, or the single missing-identifier message.
    pub errors: Vec<String>,
    /// Identifiers found before evaluation stopped, in profile order.
    pub identifiers: Vec<ResolvedIdentifier>,
    /// Name of the identifier that short-circuited validation, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_identifier: Option<String>,
}

impl ValidationVerdict {
    /// Verdict for a document that reached rule evaluation.
    pub fn from_errors(identifiers: Vec<ResolvedIdentifier>, errors: Vec<String>) -> Self {
        Self {
            ok: errors.is_empty(),
            errors,
            identifiers,
            missing_identifier: None,
        }
    }

    /// Verdict for a request missing the named identifier.
    pub fn missing_identifier(
        identifiers: Vec<ResolvedIdentifier>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            ok: false,
            errors: vec![message.into()],
            identifiers,
            missing_identifier: Some(name.into()),
        }
    }

    /// Classify the verdict.
    pub fn kind(&self) -> VerdictKind {
        if self.missing_identifier.is_some() {
            VerdictKind::MissingIdentifier
        } else if self.ok {
            VerdictKind::Passed
        } else {
            VerdictKind::FieldFailures
        }
    }

    /// Client-facing JSON body for this verdict.
    ///
    /// - passed: `{"message": success_message, ...identifiers}`
    /// - missing identifier: `{"error": message, ...identifiers found so far}`
    /// - field failures: `{"errors": [...], ...identifiers}`
    pub fn into_response_body(self, success_message: &str) -> Map<String, Value> {
        let mut body = Map::new();
        match self.kind() {
            VerdictKind::Passed => {
                body.insert("message".to_string(), Value::String(success_message.to_string()));
            }
            VerdictKind::MissingIdentifier => {
                let message = self.errors.into_iter().next().unwrap_or_default();
                body.insert("error".to_string(), Value::String(message));
            }
            VerdictKind::FieldFailures => {
                let errors = self.errors.into_iter().map(Value::String).collect();
                body.insert("errors".to_string(), Value::Array(errors));
            }
        }
        for id in self.identifiers {
            body.insert(id.name, id.value);
        }
        body
    }

    /// Value of a resolved identifier by name.
    pub fn identifier(&self, name: &str) -> Option<&Value> {
        self.identifiers
            .iter()
            .find(|id| id.name == name)
            .map(|id| &id.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(value: &str) -> ResolvedIdentifier {
        ResolvedIdentifier {
            name: "userId".to_string(),
            value: Value::String(value.to_string()),
        }
    }

    #[test]
    fn empty_errors_pass() {
        let verdict = ValidationVerdict::from_errors(vec![user("u1")], Vec::new());
        assert!(verdict.ok);
        assert_eq!(verdict.kind(), VerdictKind::Passed);
        assert_eq!(verdict.identifier("userId"), Some(&Value::from("u1")));
        assert_eq!(verdict.identifier("productId"), None);
    }

    #[test]
    fn field_errors_fail() {
        let verdict =
            ValidationVerdict::from_errors(vec![user("u1")], vec!["Email is invalid.".into()]);
        assert!(!verdict.ok);
        assert_eq!(verdict.kind(), VerdictKind::FieldFailures);
    }

    #[test]
    fn missing_identifier_has_single_error() {
        let verdict = ValidationVerdict::missing_identifier(
            vec![user("u1")],
            "productId",
            "Product ID is missing in the request headers.",
        );
        assert!(!verdict.ok);
        assert_eq!(verdict.errors.len(), 1);
        assert_eq!(verdict.kind(), VerdictKind::MissingIdentifier);
        assert_eq!(verdict.missing_identifier.as_deref(), Some("productId"));
        assert_eq!(verdict.identifier("userId"), Some(&Value::from("u1")));
    }

    #[test]
    fn response_body_shapes() {
        let passed = ValidationVerdict::from_errors(vec![user("u1")], Vec::new());
        assert_eq!(
            Value::Object(passed.into_response_body("User data is valid.")),
            serde_json::json!({"message": "User data is valid.", "userId": "u1"})
        );

        let failed =
            ValidationVerdict::from_errors(vec![user("u1")], vec!["Email is invalid.".into()]);
        assert_eq!(
            Value::Object(failed.into_response_body("unused")),
            serde_json::json!({"errors": ["Email is invalid."], "userId": "u1"})
        );

        let missing = ValidationVerdict::missing_identifier(
            Vec::new(),
            "userId",
            "User ID is missing in the request.",
        );
        assert_eq!(
            Value::Object(missing.into_response_body("unused")),
            serde_json::json!({"error": "User ID is missing in the request."})
        );
    }

    #[test]
    fn serializes_without_missing_identifier_when_none() {
        let verdict = ValidationVerdict::from_errors(Vec::new(), Vec::new());
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["ok"], true);
        assert!(json.get("missing_identifier").is_none());
    }
}
