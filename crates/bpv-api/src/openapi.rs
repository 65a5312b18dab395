//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Business Profile Validation API",
        version = "0.1.0",
        description = "Validates nested business-profile documents against declarative field-path rule tables.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::validation::validate_user,
        crate::routes::validation::validate_product,
        crate::routes::profiles::list_profiles,
        crate::routes::profiles::get_profile_rules,
        crate::middleware::metrics::metrics_snapshot,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::profiles::ProfileList,
        crate::routes::profiles::IdentifierView,
        crate::routes::profiles::RuleView,
        crate::routes::profiles::ProfileRulesResponse,
        crate::middleware::metrics::MetricsSnapshot,
    )),
    tags(
        (name = "validation", description = "Business profile validation"),
        (name = "profiles", description = "Rule table introspection"),
        (name = "operations", description = "Operational counters"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
