//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Built once at startup; the profile registry
//! inside is immutable and shared behind `Arc`, so cloning the state per
//! request is cheap and lock-free.

use std::path::PathBuf;

use bpv_core::{ConfigError, ProfileRegistry};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Log output format for the server binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Server configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to (`PORT`).
    pub port: u16,
    /// Optional YAML/JSON profile file overlaying the built-ins (`PROFILES_FILE`).
    pub profiles_file: Option<PathBuf>,
    /// Log format (`LOG_FORMAT=json` selects JSON).
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Build configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// An unparseable `PORT` falls back to [`DEFAULT_PORT`]; an empty
    /// `PROFILES_FILE` is ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let profiles_file = lookup("PROFILES_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let log_format = match lookup("LOG_FORMAT") {
            Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };
        Self {
            port,
            profiles_file,
            log_format,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            profiles_file: None,
            log_format: LogFormat::Pretty,
        }
    }
}

/// Shared application state passed to all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Validators by profile name, built once at startup.
    pub registry: ProfileRegistry,
    /// Configuration the state was built from.
    pub config: AppConfig,
}

impl AppState {
    /// State with default configuration and the built-in profiles.
    pub fn new() -> Self {
        Self {
            registry: ProfileRegistry::builtin(),
            config: AppConfig::default(),
        }
    }

    /// State for the given configuration, loading its profile file if set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the profile file cannot be loaded.
    pub fn try_with_config(config: AppConfig) -> Result<Self, ConfigError> {
        let registry = ProfileRegistry::load(config.profiles_file.as_deref())?;
        Ok(Self { registry, config })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn reads_port_and_profiles_file() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "8081"),
            ("PROFILES_FILE", "/etc/bpv/profiles.yaml"),
            ("LOG_FORMAT", "JSON"),
        ]));
        assert_eq!(config.port, 8081);
        assert_eq!(
            config.profiles_file,
            Some(PathBuf::from("/etc/bpv/profiles.yaml"))
        );
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_port_falls_back() {
        let config = AppConfig::from_lookup(lookup_from(&[("PORT", "http"), ("PROFILES_FILE", " ")]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.profiles_file, None);
    }

    #[test]
    fn state_with_missing_profile_file_fails() {
        let config = AppConfig {
            profiles_file: Some(PathBuf::from("/definitely/not/here.yaml")),
            ..AppConfig::default()
        };
        assert!(AppState::try_with_config(config).is_err());
    }

    #[test]
    fn default_state_has_builtin_profiles() {
        let state = AppState::new();
        assert!(state.registry.get("user").is_some());
        assert!(state.registry.get("product").is_some());
    }
}
