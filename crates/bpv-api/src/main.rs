//! # bpv-api: Binary Entry Point
//!
//! Starts the Axum HTTP server for business-profile validation.
//! Binds to `PORT` (default 3000); loads `PROFILES_FILE` if set.

use bpv_api::state::{AppConfig, AppState, LogFormat};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    let state = AppState::try_with_config(config.clone()).map_err(|e| {
        tracing::error!("Profile configuration failed: {e}");
        e
    })?;

    tracing::info!(
        profiles = ?state.registry.names().collect::<Vec<_>>(),
        profiles_file = ?config.profiles_file,
        "validation profiles loaded"
    );

    let app = bpv_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Profile validation API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
