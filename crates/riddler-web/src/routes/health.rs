//! Health check and provider status endpoints.

use axum::{Json, extract::State};
use serde::Serialize;

use riddler_common::{KeyCheck, Provider};

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_secs: u64,
}

/// Basic health check (is the server running?)
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.uptime_secs(),
    })
}

#[derive(Serialize)]
pub struct StatusResponse {
    provider: Provider,
    key_check: KeyCheck,
    /// Any key configured in the environment (never the key itself)
    key_detected: bool,
    openai_key_configured: bool,
    google_key_configured: bool,
    ai_available: bool,
}

/// Configured provider and whether it has the key it needs
pub async fn provider_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let settings = &state.provider_defaults;

    Json(StatusResponse {
        provider: settings.provider,
        key_check: settings.validate(),
        key_detected: settings.any_key_present(),
        openai_key_configured: settings.openai_api_key.is_some(),
        google_key_configured: settings.google_api_key.is_some(),
        ai_available: settings.ai_available(),
    })
}
