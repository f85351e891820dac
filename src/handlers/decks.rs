// Deck handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    auth::CurrentProfile,
    error::ApiError,
    models::deck::CreateDeckRequest,
    state::AppState,
};

/// Create a deck in a language profile
/// POST /langProfile/:lang_profile_id/decks
pub async fn create_deck(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(lang_profile_id): Path<i64>,
    Json(request): Json<CreateDeckRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Creating deck '{}' in language profile {}", request.name.trim(), lang_profile_id);

    let deck = state
        .db
        .create_deck(profile.id, lang_profile_id, request)
        .await?;

    Ok((StatusCode::CREATED, Json(deck)))
}

/// GET /langProfile/:lang_profile_id/decks
pub async fn list_decks(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(lang_profile_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let decks = state.db.list_decks(profile.id, lang_profile_id).await?;

    info!("Retrieved {} decks for language profile {}", decks.len(), lang_profile_id);
    Ok((StatusCode::OK, Json(decks)))
}

/// GET /decks/:deck_id
pub async fn get_deck(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(deck_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let deck = state.db.get_deck(profile.id, deck_id).await?;

    Ok((StatusCode::OK, Json(deck)))
}

/// DELETE /decks/:deck_id
pub async fn delete_deck(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(deck_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.delete_deck(profile.id, deck_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
