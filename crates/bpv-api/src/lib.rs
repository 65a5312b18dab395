//! # bpv-api: Axum API Service for Business Profile Validation
//!
//! HTTP surface over the `bpv-core` validation engine. Handlers parse the
//! JSON body, hand it with the request headers to the route's profile
//! validator, and map the verdict to a response. No validation logic lives
//! in this crate.
//!
//! ## API Surface
//!
//! | Route                          | Module                   |
//! |--------------------------------|--------------------------|
//! | `POST /user/validate`          | [`routes::validation`]   |
//! | `POST /product/validate`       | [`routes::validation`]   |
//! | `GET /v1/profiles`             | [`routes::profiles`]     |
//! | `GET /v1/profiles/{name}/rules`| [`routes::profiles`]     |
//! | `GET /metrics`                 | [`middleware::metrics`]  |
//! | `GET /openapi.json`            | [`openapi`]              |
//! | `GET /health/*`                | this module              |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

pub use error::AppError;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) are mounted outside the middleware stack.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();

    let api = Router::new()
        .merge(routes::validation::router())
        .merge(routes::profiles::router())
        .merge(openapi::router())
        .route("/metrics", get(middleware::metrics::metrics_snapshot))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer())
        .layer(axum::Extension(metrics))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: returns 200 once the profile registry is loaded,
/// which happens before the listener is bound.
async fn readiness() -> &'static str {
    "ready"
}
