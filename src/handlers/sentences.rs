// Sentence generation handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    auth::CurrentProfile,
    error::ApiError,
    models::sentence::GenerateSentenceRequest,
    sentences::SentencePrompt,
    state::AppState,
};

/// Generate a fresh example sentence for a sense
/// POST /users/:user_id/senses/:sense_id/sentence_history
pub async fn generate_sentence(
    State(state): State<AppState>,
    profile: CurrentProfile,
    Path((user_id, sense_id)): Path<(i64, i64)>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    profile.ensure_user(user_id)?;

    let request = GenerateSentenceRequest::from_body(&body).map_err(ApiError::Validation)?;
    request.validate().map_err(ApiError::Validation)?;
    let language = request.normalized_language();

    let sense = state.db.get_sense_for_user(user_id, sense_id).await?;
    let known_words = state
        .db
        .known_words(user_id, sense_id, state.context_words)
        .await?;

    info!(
        "Generating '{}' sentence for sense {} with {} context words",
        language,
        sense_id,
        known_words.len()
    );

    let prompt = SentencePrompt {
        word: &sense.word,
        translation: &sense.translation,
        language: &language,
        known_words: &known_words,
    };
    let sentence = state.sentences.generate(&prompt).await?;

    let record = state
        .db
        .record_sentence(user_id, sense_id, &language, &sentence)
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Sentences previously generated for a sense, newest first
/// GET /users/:user_id/senses/:sense_id/sentence_history
pub async fn sentence_history(
    State(state): State<AppState>,
    profile: CurrentProfile,
    Path((user_id, sense_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, ApiError> {
    profile.ensure_user(user_id)?;

    let history = state.db.sentence_history(user_id, sense_id).await?;

    Ok((StatusCode::OK, Json(history)))
}
