//! # Validation Profiles
//!
//! A [`ValidationProfile`] pairs a required-identifier strategy with a rule
//! table. Two profiles are built in:
//!
//! - `user`: `userId` from body field `id`; business-profile rules at the
//!   document root.
//! - `product`: `userId` from body field `userId`, then `productId` from the
//!   `productId` header; business-profile rules nested under `data`.
//!
//! A profile file (YAML or JSON) can replace built-ins or add profiles. The
//! resulting [`ProfileRegistry`] is built once at startup and never mutated.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::identifier::IdentifierSpec;
use crate::path::FieldPath;
use crate::rules::RuleSet;
use crate::validator::PathValidator;

/// Name of the built-in user profile.
pub const USER_PROFILE: &str = "user";
/// Name of the built-in product profile.
pub const PRODUCT_PROFILE: &str = "product";

const USER_ID_MISSING: &str = "User ID is missing in the request.";
const PRODUCT_ID_MISSING: &str = "Product ID is missing in the request headers.";

/// A named identifier strategy plus rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationProfile {
    /// Profile name.
    pub name: String,
    /// Confirmation message returned on success.
    pub success_message: String,
    /// Required identifiers, checked in order before any rule.
    pub identifiers: Vec<IdentifierSpec>,
    /// Field rules, evaluated in order.
    pub rules: RuleSet,
}

impl ValidationProfile {
    /// The built-in `user` profile.
    pub fn user() -> Self {
        Self {
            name: USER_PROFILE.to_string(),
            success_message: "User data is valid.".to_string(),
            identifiers: vec![IdentifierSpec::body("userId", "id", USER_ID_MISSING)],
            rules: RuleSet::business_profile(),
        }
    }

    /// The built-in `product` profile.
    pub fn product() -> Self {
        Self {
            name: PRODUCT_PROFILE.to_string(),
            success_message: "Product data is valid.".to_string(),
            identifiers: vec![
                IdentifierSpec::body("userId", "userId", USER_ID_MISSING),
                IdentifierSpec::header("productId", "productId", PRODUCT_ID_MISSING),
            ],
            rules: RuleSet::business_profile().rebased(&FieldPath::from_static("data")),
        }
    }

    /// Reject profiles with empty names or identifier keys.
    fn checked(self) -> Result<Self, ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyProfileName);
        }
        for (index, spec) in self.identifiers.iter().enumerate() {
            if spec.name.is_empty() || spec.source.key().is_empty() {
                return Err(ConfigError::InvalidIdentifier {
                    profile: self.name.clone(),
                    index,
                });
            }
        }
        Ok(self)
    }
}

/// A profile as written in a profile file.
///
/// `rules` defaults to the built-in business-profile table; `root`, when
/// set, nests every rule path under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileSpec {
    /// Profile name.
    pub name: String,
    /// Confirmation message returned on success.
    pub success_message: String,
    /// Required identifiers.
    #[serde(default)]
    pub identifiers: Vec<IdentifierSpec>,
    /// Path prefix applied to every rule.
    #[serde(default)]
    pub root: Option<FieldPath>,
    /// Explicit rule table.
    #[serde(default)]
    pub rules: Option<RuleSet>,
}

impl ProfileSpec {
    /// Resolve defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the name or an identifier is empty.
    pub fn into_profile(self) -> Result<ValidationProfile, ConfigError> {
        let rules = self.rules.unwrap_or_else(RuleSet::business_profile);
        let rules = match &self.root {
            Some(root) => rules.rebased(root),
            None => rules,
        };
        ValidationProfile {
            name: self.name,
            success_message: self.success_message,
            identifiers: self.identifiers,
            rules,
        }
        .checked()
    }
}

/// Top-level shape of a profile file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileFile {
    /// Declared profiles.
    pub profiles: Vec<ProfileSpec>,
}

impl ProfileFile {
    /// Read and parse a profile file. `.json` files are parsed as JSON,
    /// everything else as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            serde_json::from_str(&text).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&text).map_err(|e| e.to_string())
        };
        parsed.map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Resolve every spec into a profile, rejecting duplicate names.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn into_profiles(self) -> Result<Vec<ValidationProfile>, ConfigError> {
        let mut seen = std::collections::BTreeSet::new();
        let mut profiles = Vec::with_capacity(self.profiles.len());
        for spec in self.profiles {
            let profile = spec.into_profile()?;
            if !seen.insert(profile.name.clone()) {
                return Err(ConfigError::DuplicateProfile(profile.name));
            }
            profiles.push(profile);
        }
        Ok(profiles)
    }
}

/// Immutable name → validator map shared by all request handlers.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    validators: Arc<BTreeMap<String, PathValidator>>,
}

impl ProfileRegistry {
    /// Registry with the built-in `user` and `product` profiles.
    pub fn builtin() -> Self {
        let validators = [ValidationProfile::user(), ValidationProfile::product()]
            .into_iter()
            .map(|profile| (profile.name.clone(), PathValidator::new(profile)))
            .collect();
        Self {
            validators: Arc::new(validators),
        }
    }

    /// Registry with exactly the given profiles.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateProfile`] if two profiles share a name.
    pub fn from_profiles(
        profiles: impl IntoIterator<Item = ValidationProfile>,
    ) -> Result<Self, ConfigError> {
        let mut validators = BTreeMap::new();
        for profile in profiles {
            let profile = profile.checked()?;
            let name = profile.name.clone();
            if validators.insert(name.clone(), PathValidator::new(profile)).is_some() {
                return Err(ConfigError::DuplicateProfile(name));
            }
        }
        Ok(Self {
            validators: Arc::new(validators),
        })
    }

    /// Built-ins, overlaid with the profiles of `path` when given.
    ///
    /// A file profile with a built-in name replaces the built-in.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, parsed or resolved.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::builtin());
        };
        let overrides = ProfileFile::load(path)?.into_profiles()?;
        let mut validators = (*Self::builtin().validators).clone();
        for profile in overrides {
            tracing::info!(
                profile = %profile.name,
                rules = profile.rules.len(),
                replaces_builtin = validators.contains_key(&profile.name),
                "loaded profile from {}",
                path.display()
            );
            validators.insert(profile.name.clone(), PathValidator::new(profile));
        }
        Ok(Self {
            validators: Arc::new(validators),
        })
    }

    /// Validator for a profile name.
    pub fn get(&self, name: &str) -> Option<&PathValidator> {
        self.validators.get(name)
    }

    /// Profile names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(String::as_str)
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
