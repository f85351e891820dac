use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use super::AuthUser;
use crate::{
    error::{ApiError, ApiResult},
    models::UserProfile,
    state::AppState,
};

/// A request carrying a bearer token the auth provider accepted.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub user: AuthUser,
    pub access_token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for Authenticated {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let access_token = bearer_token(&parts.headers)?;
        let user = state.auth.get_user(&access_token).await?;

        Ok(Authenticated { user, access_token })
    }
}

/// The caller's profile, created on their first authenticated request.
#[derive(Debug, Clone)]
pub struct CurrentProfile(pub UserProfile);

#[async_trait]
impl FromRequestParts<AppState> for CurrentProfile {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let authenticated = Authenticated::from_request_parts(parts, state).await?;
        let profile = state.db.get_or_create_profile(&authenticated.user).await?;

        Ok(CurrentProfile(profile))
    }
}

impl CurrentProfile {
    /// Rejects requests addressing another user's resources by id.
    pub fn ensure_user(&self, user_id: i64) -> ApiResult<()> {
        if self.0.id == user_id {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "You can only access your own resources".to_string(),
            ))
        }
    }
}

pub fn bearer_token(headers: &HeaderMap) -> ApiResult<String> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?
        .to_str()
        .map_err(|_| ApiError::unauthorized("Malformed Authorization header"))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| ApiError::unauthorized("Malformed Authorization header"))?;

    if !scheme.eq_ignore_ascii_case("bearer") || token.trim().is_empty() {
        return Err(ApiError::unauthorized("Expected a bearer token"));
    }

    Ok(token.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderValue, response::IntoResponse};
    use chrono::Utc;
    use uuid::Uuid;

    fn caller(id: i64) -> CurrentProfile {
        CurrentProfile(UserProfile {
            id,
            auth_user_id: Some(Uuid::new_v4()),
            email: "mei@u.nus.edu".to_string(),
            username: "mei".to_string(),
            created_at: Utc::now(),
        })
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
        assert_eq!(bearer_token(&headers("bearer  tok ")).unwrap(), "tok");
    }

    #[test]
    fn test_bearer_token_rejections() {
        assert!(matches!(bearer_token(&HeaderMap::new()), Err(ApiError::Unauthorized(_))));
        assert!(matches!(bearer_token(&headers("Basic dXNlcg==")), Err(ApiError::Unauthorized(_))));
        assert!(matches!(bearer_token(&headers("Bearer ")), Err(ApiError::Unauthorized(_))));
        assert!(matches!(bearer_token(&headers("token")), Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_ensure_user_accepts_own_id() {
        assert!(caller(7).ensure_user(7).is_ok());
    }

    #[test]
    fn test_ensure_user_forbids_other_ids() {
        let profile = caller(7);
        for other in [0, 6, 8, -7, i64::MAX] {
            assert!(matches!(profile.ensure_user(other), Err(ApiError::Forbidden(_))));
        }

        let response = profile.ensure_user(8).unwrap_err().into_response();
        assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
    }
}
