// User profile handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

use crate::{
    auth::CurrentProfile,
    error::ApiError,
    models::user_profile::CreateUserProfileRequest,
    state::AppState,
};

/// The signed-in user's profile
/// GET /me
pub async fn me(CurrentProfile(profile): CurrentProfile) -> Result<impl IntoResponse, ApiError> {
    Ok((StatusCode::OK, Json(profile)))
}

/// Create a profile ahead of the account's first sign-in
/// POST /userProfiles
pub async fn create_user_profile(
    State(state): State<AppState>,
    Json(request): Json<CreateUserProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    info!("Creating user profile for email: {}", request.email.trim());

    let profile = state.db.create_user_profile(request).await?;

    Ok((StatusCode::CREATED, Json(profile)))
}
