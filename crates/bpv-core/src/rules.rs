//! # Rule Tables
//!
//! A [`RuleSet`] is the declarative part of the engine: an ordered list of
//! [`FieldRule`]s, each mapping a [`FieldPath`] to a [`Check`] and the
//! message reported when the check fails. Rule order is error order.
//!
//! [`RuleSet::business_profile`] is the built-in table for business-profile
//! documents (company and legal names, tax identifiers, email, business and
//! legal addresses).

use serde::{Deserialize, Serialize};

use crate::check::Check;
use crate::document::{resolve_path, Document};
use crate::error::ConfigError;
use crate::path::FieldPath;

/// One declarative rule: where to look, what to check, what to report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    /// Dotted path of the target field.
    pub path: FieldPath,
    /// Predicate applied when the field is present.
    pub check: Check,
    /// Error message reported when the predicate fails.
    pub message: String,
}

/// Result of evaluating one rule against one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The field was absent; the rule did not fire.
    Skipped,
    /// The field was present and passed.
    Passed,
    /// The field was present and failed.
    Failed,
}

impl FieldRule {
    /// Build a rule from a dotted path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFieldPath`] if `path` is malformed.
    pub fn new(
        path: impl Into<String>,
        check: Check,
        message: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            path: FieldPath::parse(path)?,
            check,
            message: message.into(),
        })
    }

    /// Evaluate the rule. The check is never applied to an absent field.
    pub fn evaluate(&self, document: &Document) -> RuleOutcome {
        let value = resolve_path(document, &self.path);
        if value.is_absent() {
            RuleOutcome::Skipped
        } else if self.check.accepts(value) {
            RuleOutcome::Passed
        } else {
            RuleOutcome::Failed
        }
    }

    /// This rule with its path nested under `prefix`.
    pub fn rebased(&self, prefix: &FieldPath) -> Self {
        Self {
            path: self.path.rebased(prefix),
            check: self.check,
            message: self.message.clone(),
        }
    }
}

/// Ordered, immutable rule table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

/// Built-in business-profile rules: (path, check, message).
const BUSINESS_PROFILE_RULES: &[(&str, Check, &str)] = &[
    (
        "businessProfile.companyName",
        Check::NonEmpty,
        "Company name should not be empty.",
    ),
    (
        "businessProfile.legalName",
        Check::NonEmpty,
        "Legal name should not be empty.",
    ),
    (
        "businessProfile.taxIdentifiers.pan",
        Check::Pan,
        "PAN should be 10 alphanumeric characters.",
    ),
    (
        "businessProfile.taxIdentifiers.ein",
        Check::Ein,
        "EIN should be 8 digits.",
    ),
    ("businessProfile.email", Check::Email, "Email is invalid."),
    (
        "businessProfile.businessAddress.line1",
        Check::NonEmpty,
        "Business address line1 should not be empty.",
    ),
    (
        "businessProfile.businessAddress.city",
        Check::NonEmpty,
        "Business address city should not be empty.",
    ),
    (
        "businessProfile.businessAddress.state",
        Check::NonEmpty,
        "Business address state should not be empty.",
    ),
    (
        "businessProfile.businessAddress.country",
        Check::NonEmpty,
        "Business address country should not be empty.",
    ),
    (
        "businessProfile.businessAddress.zip",
        Check::Zip,
        "Business address zip code should be a valid 5-digit numeric value.",
    ),
    (
        "businessProfile.legalAddress.line1",
        Check::NonEmpty,
        "Legal address line1 should not be empty.",
    ),
    (
        "businessProfile.legalAddress.city",
        Check::NonEmpty,
        "Legal address city should not be empty.",
    ),
    (
        "businessProfile.legalAddress.state",
        Check::NonEmpty,
        "Legal address state should not be empty.",
    ),
    (
        "businessProfile.legalAddress.country",
        Check::NonEmpty,
        "Legal address country should not be empty.",
    ),
    (
        "businessProfile.legalAddress.zip",
        Check::Zip,
        "Legal address zip code should be a valid 5-digit numeric value.",
    ),
];

impl RuleSet {
    /// Build a rule set; order is preserved.
    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// The built-in business-profile table, rooted at `businessProfile`.
    pub fn business_profile() -> Self {
        let rules = BUSINESS_PROFILE_RULES
            .iter()
            .map(|&(path, check, message)| FieldRule {
                path: FieldPath::from_static(path),
                check,
                message: message.to_string(),
            })
            .collect();
        Self { rules }
    }

    /// Rules in table order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldRule> {
        self.rules.iter()
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every rule nested under `prefix`, order preserved.
    pub fn rebased(&self, prefix: &FieldPath) -> Self {
        Self {
            rules: self.rules.iter().map(|rule| rule.rebased(prefix)).collect(),
        }
    }

    /// Apply every rule in order, collecting the messages of failing rules.
    pub fn evaluate(&self, document: &Document) -> Vec<String> {
        self.rules
            .iter()
            .filter(|rule| rule.evaluate(document) == RuleOutcome::Failed)
            .map(|rule| rule.message.clone())
            .collect()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a FieldRule;
    type IntoIter = std::slice::Iter<'a, FieldRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
