//! # PathValidator
//!
//! Applies one [`ValidationProfile`] to a document: required identifiers
//! first (short-circuiting on the first missing one), then every field rule
//! in table order. Validation is synchronous, lock-free and pure; a single
//! validator is built at startup and cloned cheaply into request handlers.

use std::sync::Arc;

use crate::document::Document;
use crate::identifier::IdentifierLookup;
use crate::profile::ValidationProfile;
use crate::verdict::{ResolvedIdentifier, ValidationVerdict};

/// Validator for one profile. Cloning shares the profile.
#[derive(Debug, Clone)]
pub struct PathValidator {
    profile: Arc<ValidationProfile>,
}

impl PathValidator {
    /// Wrap a profile.
    pub fn new(profile: ValidationProfile) -> Self {
        Self {
            profile: Arc::new(profile),
        }
    }

    /// The profile this validator applies.
    pub fn profile(&self) -> &ValidationProfile {
        &self.profile
    }

    /// Validate `document`, reading header-sourced identifiers from `lookup`.
    pub fn validate(&self, document: &Document, lookup: &dyn IdentifierLookup) -> ValidationVerdict {
        let profile = &self.profile;
        let mut identifiers = Vec::with_capacity(profile.identifiers.len());

        for spec in &profile.identifiers {
            match spec.extract(document, lookup) {
                Some(value) => identifiers.push(ResolvedIdentifier {
                    name: spec.name.clone(),
                    value,
                }),
                None => {
                    tracing::debug!(
                        profile = %profile.name,
                        identifier = %spec.name,
                        source = spec.source.key(),
                        "required identifier missing"
                    );
                    return ValidationVerdict::missing_identifier(
                        identifiers,
                        spec.name.clone(),
                        spec.message.clone(),
                    );
                }
            }
        }

        let errors = profile.rules.evaluate(document);
        tracing::debug!(
            profile = %profile.name,
            rules = profile.rules.len(),
            failures = errors.len(),
            "field rules evaluated"
        );
        ValidationVerdict::from_errors(identifiers, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::{NoHeaders, StaticHeaders};
    use crate::verdict::VerdictKind;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("test document must be an object, got {other}"),
        }
    }

    fn user() -> PathValidator {
        PathValidator::new(ValidationProfile::user())
    }

    fn product() -> PathValidator {
        PathValidator::new(ValidationProfile::product())
    }

    #[test]
    fn valid_user_document_passes() {
        let d = doc(json!({
            "id": "u1",
            "businessProfile": {
                "companyName": "Acme",
                "taxIdentifiers": {"pan": "AB12345678"}
            }
        }));
        let verdict = user().validate(&d, &NoHeaders);
        assert!(verdict.ok);
        assert!(verdict.errors.is_empty());
        assert_eq!(verdict.identifier("userId"), Some(&json!("u1")));
    }

    #[test]
    fn whitespace_company_name_fails() {
        let d = doc(json!({"id": "u1", "businessProfile": {"companyName": "  "}}));
        let verdict = user().validate(&d, &NoHeaders);
        assert!(!verdict.ok);
        assert_eq!(verdict.errors, vec!["Company name should not be empty.".to_string()]);
        assert_eq!(verdict.kind(), VerdictKind::FieldFailures);
    }

    #[test]
    fn missing_id_short_circuits() {
        let d = doc(json!({"businessProfile": {"companyName": "  ", "email": "bad"}}));
        let verdict = user().validate(&d, &NoHeaders);
        assert!(!verdict.ok);
        assert_eq!(verdict.errors, vec!["User ID is missing in the request.".to_string()]);
        assert_eq!(verdict.missing_identifier.as_deref(), Some("userId"));
        assert!(verdict.identifiers.is_empty());
    }

    #[test]
    fn zero_id_counts_as_missing() {
        let d = doc(json!({"id": 0, "businessProfile": {"companyName": ""}}));
        let verdict = user().validate(&d, &NoHeaders);
        assert_eq!(verdict.kind(), VerdictKind::MissingIdentifier);
        assert_eq!(verdict.errors, vec!["User ID is missing in the request.".to_string()]);
        assert_eq!(
            Value::Object(verdict.into_response_body("User data is valid.")),
            json!({"error": "User ID is missing in the request."})
        );
    }

    #[test]
    fn numeric_id_is_echoed_as_number() {
        let verdict = user().validate(&doc(json!({"id": 42})), &NoHeaders);
        assert!(verdict.ok);
        assert_eq!(verdict.identifier("userId"), Some(&json!(42)));
        assert_eq!(
            Value::Object(verdict.into_response_body("User data is valid.")),
            json!({"message": "User data is valid.", "userId": 42})
        );
    }

    #[test]
    fn every_failure_is_collected() {
        let d = doc(json!({
            "id": "u1",
            "businessProfile": {
                "companyName": "",
                "legalName": " ",
                "taxIdentifiers": {"pan": "SHORT", "ein": "1234567a"},
                "email": "no-at-sign",
                "businessAddress": {
                    "line1": "", "city": "", "state": "", "country": "", "zip": "1234"
                },
                "legalAddress": {
                    "line1": "", "city": "", "state": "", "country": "", "zip": "123456"
                }
            }
        }));
        let verdict = user().validate(&d, &NoHeaders);
        let expected: Vec<String> = ValidationProfile::user()
            .rules
            .iter()
            .map(|rule| rule.message.clone())
            .collect();
        assert_eq!(verdict.errors, expected);
    }

    #[test]
    fn product_requires_header_after_user_id() {
        let d = doc(json!({
            "userId": "u1",
            "data": {"businessProfile": {"companyName": " "}}
        }));
        let verdict = product().validate(&d, &NoHeaders);
        assert_eq!(
            verdict.errors,
            vec!["Product ID is missing in the request headers.".to_string()]
        );
        assert_eq!(verdict.missing_identifier.as_deref(), Some("productId"));
        assert_eq!(verdict.identifier("userId"), Some(&json!("u1")));
    }

    #[test]
    fn product_reports_user_id_before_header() {
        let verdict = product().validate(&Document::new(), &NoHeaders);
        assert_eq!(verdict.errors, vec!["User ID is missing in the request.".to_string()]);
        assert_eq!(verdict.missing_identifier.as_deref(), Some("userId"));
    }

    #[test]
    fn product_rules_are_nested_under_data() {
        let headers = StaticHeaders::new().with("productId", "p1");
        let d = doc(json!({
            "userId": "u1",
            "data": {"businessProfile": {"taxIdentifiers": {"ein": "1234567"}}}
        }));
        let verdict = product().validate(&d, &headers);
        assert_eq!(verdict.errors, vec!["EIN should be 8 digits.".to_string()]);
        assert_eq!(verdict.identifier("productId"), Some(&json!("p1")));
    }

    #[test]
    fn validator_clones_share_profile() {
        let a = user();
        let b = a.clone();
        assert!(std::ptr::eq(a.profile(), b.profile()));
    }
}
