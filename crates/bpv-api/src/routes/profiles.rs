//! # Profile Introspection
//!
//! Routes:
//! - GET /v1/profiles: configured profile names
//! - GET /v1/profiles/{name}/rules: identifiers and rule table of one profile

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use bpv_core::{IdentifierSource, ValidationProfile};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

/// Names of all configured profiles.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileList {
    /// Profile names in sorted order.
    pub profiles: Vec<String>,
}

/// One required identifier of a profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IdentifierView {
    /// Name echoed in validation responses.
    pub name: String,
    /// "body" or "header".
    pub from: String,
    /// Body field or header name.
    pub key: String,
    /// Error returned when the identifier is missing.
    pub message: String,
}

/// One field rule, in table order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RuleView {
    /// Dotted field path.
    pub path: String,
    /// Check name (`non_empty`, `pan`, `ein`, `zip`, `email`).
    pub check: String,
    /// What the check accepts.
    pub accepts: String,
    /// Error reported when a present field fails.
    pub message: String,
}

/// Full description of a profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileRulesResponse {
    /// Profile name.
    pub name: String,
    /// Message returned when a document passes.
    pub success_message: String,
    /// Required identifiers, in check order.
    pub identifiers: Vec<IdentifierView>,
    /// Field rules, in evaluation order.
    pub rules: Vec<RuleView>,
}

impl From<&ValidationProfile> for ProfileRulesResponse {
    fn from(profile: &ValidationProfile) -> Self {
        let identifiers = profile
            .identifiers
            .iter()
            .map(|spec| IdentifierView {
                name: spec.name.clone(),
                from: match spec.source {
                    IdentifierSource::Body { .. } => "body".to_string(),
                    IdentifierSource::Header { .. } => "header".to_string(),
                },
                key: spec.source.key().to_string(),
                message: spec.message.clone(),
            })
            .collect();
        let rules = profile
            .rules
            .iter()
            .map(|rule| RuleView {
                path: rule.path.to_string(),
                check: rule.check.as_str().to_string(),
                accepts: rule.check.describe().to_string(),
                message: rule.message.clone(),
            })
            .collect();
        Self {
            name: profile.name.clone(),
            success_message: profile.success_message.clone(),
            identifiers,
            rules,
        }
    }
}

/// Build the profiles router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/profiles", get(list_profiles))
        .route("/v1/profiles/{name}/rules", get(get_profile_rules))
}

/// GET /v1/profiles: List configured profiles.
#[utoipa::path(
    get,
    path = "/v1/profiles",
    responses(
        (status = 200, description = "Configured profile names", body = ProfileList),
    ),
    tag = "profiles"
)]
pub async fn list_profiles(State(state): State<AppState>) -> Json<ProfileList> {
    Json(ProfileList {
        profiles: state.registry.names().map(str::to_string).collect(),
    })
}

/// GET /v1/profiles/{name}/rules: Identifiers and rule table of a profile.
#[utoipa::path(
    get,
    path = "/v1/profiles/{name}/rules",
    params(("name" = String, Path, description = "Profile name")),
    responses(
        (status = 200, description = "Profile found", body = ProfileRulesResponse),
        (status = 404, description = "Unknown profile", body = crate::error::ErrorBody),
    ),
    tag = "profiles"
)]
pub async fn get_profile_rules(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ProfileRulesResponse>, AppError> {
    state
        .registry
        .get(&name)
        .map(|validator| Json(ProfileRulesResponse::from(validator.profile())))
        .ok_or_else(|| AppError::NotFound(format!("profile {name} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_view_lists_header_identifier() {
        let view = ProfileRulesResponse::from(&ValidationProfile::product());
        assert_eq!(view.identifiers.len(), 2);
        assert_eq!(view.identifiers[1].from, "header");
        assert_eq!(view.identifiers[1].key, "productId");
        assert_eq!(view.rules.len(), 15);
        assert_eq!(view.rules[0].path, "data.businessProfile.companyName");
        assert_eq!(view.rules[2].check, "pan");
    }
}
