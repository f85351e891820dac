// Auth handlers
// Thin pass-through to the auth provider so clients only need one base URL

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;

use crate::{
    auth::{Authenticated, Credentials, RefreshRequest},
    error::ApiError,
    state::AppState,
};

/// Register a new account
/// POST /auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    credentials
        .validate_sign_up()
        .map_err(ApiError::Validation)?;
    info!("Sign-up requested for {}", credentials.normalized_email());

    let outcome = state.auth.sign_up(&credentials).await?;

    // Profiles for auto-confirmed accounts are created right away; others on first sign-in.
    if outcome.session.is_some() {
        state.db.get_or_create_profile(&outcome.user).await?;
    }

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Password sign-in
/// POST /auth/sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    credentials
        .validate_sign_in()
        .map_err(ApiError::Validation)?;

    let session = state.auth.sign_in_with_password(&credentials).await?;

    Ok((StatusCode::OK, Json(session)))
}

/// Exchange a refresh token for a new session
/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state.auth.refresh_session(&request.refresh_token).await?;

    Ok((StatusCode::OK, Json(session)))
}

/// Revoke the caller's session
/// POST /auth/sign-out
pub async fn sign_out(
    State(state): State<AppState>,
    authenticated: Authenticated,
) -> Result<impl IntoResponse, ApiError> {
    state.auth.sign_out(&authenticated.access_token).await?;

    info!("User {} signed out", authenticated.user.id);
    Ok(StatusCode::NO_CONTENT)
}
