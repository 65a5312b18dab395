//! # Field Paths
//!
//! A [`FieldPath`] addresses a value inside a nested document with a
//! dot-delimited string such as `businessProfile.legalAddress.zip`.
//! The path is split into segments once, at construction, so resolution
//! never re-parses it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// A parsed, dot-delimited path into a nested document.
///
/// # Validation
///
/// - Must be non-empty.
/// - Every segment between dots must be non-empty (`a..b`, `.a`, `a.` are rejected).
///
/// Segments are matched against mapping keys verbatim: no trimming, no case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a dotted path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidFieldPath`] if the path is empty or has
    /// an empty segment.
    pub fn parse(value: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = value.into();
        if raw.is_empty() {
            return Err(ConfigError::InvalidFieldPath {
                path: raw,
                reason: "path must be non-empty".to_string(),
            });
        }
        let mut segments = Vec::new();
        for (position, segment) in raw.split('.').enumerate() {
            if segment.is_empty() {
                return Err(ConfigError::InvalidFieldPath {
                    path: raw.clone(),
                    reason: format!("empty segment at position {position}"),
                });
            }
            segments.push(segment.to_string());
        }
        Ok(Self { raw, segments })
    }

    /// Build a path from a literal known to be well-formed.
    ///
    /// Only used for the built-in rule tables; a unit test parses every
    /// built-in path through [`FieldPath::parse`].
    pub(crate) fn from_static(raw: &'static str) -> Self {
        Self {
            raw: raw.to_string(),
            segments: raw.split('.').map(str::to_string).collect(),
        }
    }

    /// The dotted path text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The ordered path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    /// Number of segments (path depth).
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Return this path nested under `prefix` (`prefix.self`).
    pub fn rebased(&self, prefix: &FieldPath) -> FieldPath {
        let mut segments = prefix.segments.clone();
        segments.extend(self.segments.iter().cloned());
        FieldPath {
            raw: format!("{}.{}", prefix.raw, self.raw),
            segments,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for FieldPath {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}
