// Card handlers

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
    models::card::CreateCardRequest,
    state::AppState,
};

/// Cards of a deck in study order
/// GET /decks/:deck_id/cards
pub async fn list_cards(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(deck_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let cards = state.db.list_cards(profile.id, deck_id).await?;

    info!("Retrieved {} cards for deck {}", cards.len(), deck_id);
    Ok((StatusCode::OK, Json(cards)))
}

/// Add a word to a deck
/// POST /decks/:deck_id/cards
pub async fn create_card(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path(deck_id): Path<i64>,
    Json(request): Json<CreateCardRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Adding '{}' to deck {}", request.word.trim(), deck_id);

    let card = state.db.create_card(profile.id, deck_id, request).await?;

    Ok((StatusCode::CREATED, Json(card)))
}

/// DELETE /decks/:deck_id/cards/:card_id
pub async fn delete_card(
    State(state): State<AppState>,
    CurrentProfile(profile): CurrentProfile,
    Path((deck_id, card_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    state.db.delete_card(profile.id, deck_id, card_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
