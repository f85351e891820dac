// HTTP handlers for the REST API

pub mod auth;
pub mod cards;
pub mod decks;
pub mod lang_profiles;
pub mod sentences;
pub mod users;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::warn;

use crate::state::AppState;

/// Health check handler
/// GET /health, 503 while the database is unreachable
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.db.health_check().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
        }
    }
}
