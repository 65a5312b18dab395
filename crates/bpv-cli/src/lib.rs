//! # bpv-cli: Offline Business Profile Validation
//!
//! Provides the `bpv` command-line interface over `bpv-core`. It runs the
//! same profiles as the HTTP service, so a document can be checked in CI or
//! at a shell without standing up the API.
//!
//! ## Subcommands
//!
//! - `bpv validate`: Validate a JSON document against a profile.
//! - `bpv rules`: Print the identifiers and rule table of one or all profiles.
//!
//! ```bash
//! bpv validate profile.json
//! bpv validate order.json --profile product --header productId=p-7
//! bpv rules --profile user --profiles profiles/profiles.example.yaml
//! ```

pub mod rules;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

use bpv_core::ProfileRegistry;

/// Built-in profiles, overlaid with `profiles_file` when given.
pub fn load_registry(profiles_file: Option<&Path>) -> Result<ProfileRegistry> {
    let registry =
        ProfileRegistry::load(profiles_file).context("failed to load validation profiles")?;
    tracing::debug!(
        profiles = ?registry.names().collect::<Vec<_>>(),
        "loaded profile registry"
    );
    Ok(registry)
}
