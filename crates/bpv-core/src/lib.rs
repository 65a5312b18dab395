#![deny(missing_docs)]

//! # bpv-core: Field-Path Validation Engine
//!
//! Validates nested business-profile documents against a declarative rule
//! table. Every other crate in the workspace depends on `bpv-core`; it
//! depends on nothing internal.
//!
//! ## Design Principles
//!
//! 1. **Explicit tagged values.** Path resolution returns a [`FieldValue`]
//!    (`Absent`, `Text`, `Mapping`, `Other`). A missing field is a value of
//!    the model, never an error.
//!
//! 2. **Rules are data.** A [`RuleSet`] is an ordered, immutable list of
//!    [`FieldRule`]s pairing a [`FieldPath`] with a [`Check`] and a message.
//!    Rule order is error order.
//!
//! 3. **Pluggable identifier strategies.** Required identifiers are declared
//!    per [`ValidationProfile`] with an [`IdentifierSource`] (body field or
//!    transport header) and read through the [`IdentifierLookup`] seam.
//!
//! 4. **Failures are verdicts.** [`PathValidator::validate`] never fails; it
//!    returns a [`ValidationVerdict`]. Only configuration loading returns
//!    [`ConfigError`].
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Profiles are built once and shared behind `Arc`; validation holds no locks.

pub mod check;
pub mod document;
pub mod error;
pub mod identifier;
pub mod path;
pub mod profile;
pub mod rules;
pub mod validator;
pub mod verdict;

// Re-export primary types for ergonomic imports.
pub use check::Check;
pub use document::{resolve_path, Document, FieldValue};
pub use error::ConfigError;
pub use identifier::{
    IdentifierLookup, IdentifierSource, IdentifierSpec, NoHeaders, StaticHeaders,
};
pub use path::FieldPath;
pub use profile::{
    ProfileFile, ProfileRegistry, ProfileSpec, ValidationProfile, PRODUCT_PROFILE, USER_PROFILE,
};
pub use rules::{FieldRule, RuleOutcome, RuleSet};
pub use validator::PathValidator;
pub use verdict::{ResolvedIdentifier, ValidationVerdict, VerdictKind};
