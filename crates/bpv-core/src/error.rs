//! # Configuration Errors
//!
//! Structured error types for building rule tables and validation profiles,
//! built with `thiserror`. Validation itself never errors: field failures and
//! missing identifiers are reported through
//! [`ValidationVerdict`](crate::ValidationVerdict).

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while constructing or loading validation configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field path is empty or contains an empty segment.
    #[error("invalid field path \"{path}\": {reason}")]
    InvalidFieldPath {
        /// The rejected path text.
        path: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A profile was declared without a name.
    #[error("profile name must be non-empty")]
    EmptyProfileName,

    /// A required identifier was declared without a name or source key.
    #[error("profile \"{profile}\": identifier #{index} has an empty name or source key")]
    InvalidIdentifier {
        /// The profile that declared the identifier.
        profile: String,
        /// Zero-based position of the identifier in the profile.
        index: usize,
    },

    /// Two profiles in the same source share a name.
    #[error("duplicate profile \"{0}\"")]
    DuplicateProfile(String),

    /// The profile file could not be read.
    #[error("failed to read profile file {path}: {source}")]
    Io {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The profile file could not be parsed.
    #[error("failed to parse profile file {path}: {reason}")]
    Parse {
        /// Path of the file.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_field_path_display() {
        let err = ConfigError::InvalidFieldPath {
            path: "a..b".to_string(),
            reason: "empty segment at position 1".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("a..b"));
        assert!(msg.contains("empty segment"));
    }

    #[test]
    fn invalid_identifier_display() {
        let err = ConfigError::InvalidIdentifier {
            profile: "product".to_string(),
            index: 1,
        };
        let msg = format!("{err}");
        assert!(msg.contains("product"));
        assert!(msg.contains("#1"));
    }

    #[test]
    fn duplicate_profile_display() {
        let err = ConfigError::DuplicateProfile("user".to_string());
        assert!(format!("{err}").contains("\"user\""));
    }

    #[test]
    fn io_error_keeps_source() {
        let err = ConfigError::Io {
            path: PathBuf::from("/nope/profiles.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(format!("{err}").contains("/nope/profiles.yaml"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn parse_error_display() {
        let err = ConfigError::Parse {
            path: PathBuf::from("profiles.json"),
            reason: "expected value at line 1".to_string(),
        };
        let msg = format!("{err}");
        assert!(msg.contains("profiles.json"));
        assert!(msg.contains("line 1"));
    }
}
