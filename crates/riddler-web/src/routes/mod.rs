//! HTTP route handlers for the Riddler web server.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use riddler_common::PuzzleError;

use crate::state::AppState;

mod health;
mod puzzles;
mod ui;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        // Web UI
        .route("/", get(ui::index))

        // Health & Status
        .route("/health", get(health::health_check))
        .route("/api/status", get(health::provider_status))

        // Puzzle endpoints
        .route("/api/options", get(puzzles::options))
        .route("/api/puzzle", get(puzzles::single_puzzle))
        .route(
            "/api/puzzles",
            get(puzzles::template_puzzles).post(puzzles::generate_puzzles),
        )

        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))

        // Add shared state
        .with_state(state)
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// JSON error response for a [`PuzzleError`]
pub struct ApiError(PuzzleError);

impl From<PuzzleError> for ApiError {
    fn from(err: PuzzleError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Rejected request");
        }

        let body = ErrorBody {
            error: self.0.message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
