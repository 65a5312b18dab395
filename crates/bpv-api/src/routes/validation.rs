//! # Profile Validation Endpoints
//!
//! Routes:
//! - POST /user/validate: validate with the `user` profile (`id` in body)
//! - POST /product/validate: validate with the `product` profile
//!   (`userId` in body, `productId` header)
//!
//! Verdict mapping:
//! - missing identifier → 400 `{"error": "...", <present identifiers>}`
//! - field failures → 400 `{"errors": [...], <identifiers>}`
//! - pass → 200 `{"message": "...", <identifiers>}`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use bpv_core::profile::{PRODUCT_PROFILE, USER_PROFILE};
use bpv_core::{ValidationProfile, ValidationVerdict, VerdictKind};
use serde_json::Value;

use crate::error::AppError;
use crate::extractors::{extract_document, RequestHeaders};
use crate::state::AppState;

/// Build the validation router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/validate", post(validate_user))
        .route("/product/validate", post(validate_product))
}

/// POST /user/validate: Validate a user's business profile.
#[utoipa::path(
    post,
    path = "/user/validate",
    responses(
        (status = 200, description = "Document is valid; body carries the confirmation message and userId"),
        (status = 400, description = "Missing user ID (`error`), failing fields (`errors`), or malformed body", body = crate::error::ErrorBody),
    ),
    tag = "validation"
)]
pub async fn validate_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    validate_with_profile(&state, USER_PROFILE, &headers, body)
}

/// POST /product/validate: Validate a product-scoped business profile.
#[utoipa::path(
    post,
    path = "/product/validate",
    params(("productId" = String, Header, description = "Product identifier")),
    responses(
        (status = 200, description = "Document is valid; body carries the confirmation message, userId and productId"),
        (status = 400, description = "Missing user or product ID (`error`), failing fields (`errors`), or malformed body", body = crate::error::ErrorBody),
    ),
    tag = "validation"
)]
pub async fn validate_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    validate_with_profile(&state, PRODUCT_PROFILE, &headers, body)
}

fn validate_with_profile(
    state: &AppState,
    profile: &str,
    headers: &HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, AppError> {
    let validator = state
        .registry
        .get(profile)
        .ok_or_else(|| AppError::Internal(format!("profile {profile} is not configured")))?;
    let document = extract_document(body)?;
    let verdict = validator.validate(&document, &RequestHeaders(headers));

    tracing::info!(
        profile,
        outcome = ?verdict.kind(),
        errors = verdict.errors.len(),
        "validation verdict"
    );

    Ok(verdict_response(validator.profile(), verdict))
}

/// Map a verdict to its HTTP status and body.
pub fn verdict_response(profile: &ValidationProfile, verdict: ValidationVerdict) -> Response {
    let status = match verdict.kind() {
        VerdictKind::Passed => StatusCode::OK,
        VerdictKind::MissingIdentifier | VerdictKind::FieldFailures => StatusCode::BAD_REQUEST,
    };
    let body = verdict.into_response_body(&profile.success_message);
    (status, Json(Value::Object(body))).into_response()
}
