// Language profile handlers

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
    models::lang_profile::CreateLangProfileRequest,
    state::AppState,
};

/// Start studying a language
/// POST /users/:user_id/langProfile
pub async fn create_lang_profile(
    State(state): State<AppState>,
    profile: CurrentProfile,
    Path(user_id): Path<i64>,
    Json(request): Json<CreateLangProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    profile.ensure_user(user_id)?;
    info!("Creating language profile '{}' for user {}", request.lang.trim(), user_id);

    let lang_profile = state.db.create_lang_profile(user_id, request).await?;

    Ok((StatusCode::CREATED, Json(lang_profile)))
}

/// GET /users/:user_id/langProfiles
pub async fn list_lang_profiles(
    State(state): State<AppState>,
    profile: CurrentProfile,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    profile.ensure_user(user_id)?;

    let lang_profiles = state.db.list_lang_profiles(user_id).await?;

    Ok((StatusCode::OK, Json(lang_profiles)))
}
