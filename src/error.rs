use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tokio_postgres::error::SqlState;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The auth provider or the sentence generator failed or answered garbage.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Database(_) => "DATABASE_ERROR",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::Upstream(_) => "UPSTREAM_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The message clients see in the `detail` field. Database and internal
    /// failures are logged in full but reported generically.
    pub fn detail(&self) -> String {
        match self {
            ApiError::Database(err) => {
                if err.contains("timeout") {
                    "Database operation timed out, please try again".to_string()
                } else if err.contains("unavailable") || err.contains("connection") {
                    "Database service is temporarily unavailable".to_string()
                } else {
                    "A database error occurred".to_string()
                }
            }
            ApiError::Validation(message)
            | ApiError::Conflict(message)
            | ApiError::Unauthorized(message)
            | ApiError::Forbidden(message)
            | ApiError::Upstream(message) => message.clone(),
            ApiError::NotFound(resource) => format!("{} not found", resource),
            ApiError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Database(ref err) => {
                if err.contains("timeout") {
                    tracing::warn!("PostgreSQL operation timeout: {}", err);
                } else {
                    tracing::error!("PostgreSQL database error: {}", err);
                }
            }
            ApiError::Upstream(ref err) => tracing::warn!("Upstream service error: {}", err),
            ApiError::Internal(ref err) => tracing::error!("Internal server error: {:#}", err),
            ref other => tracing::debug!("Request rejected: {}", other),
        }

        let body = Json(json!({
            "detail": self.detail(),
            "code": self.code(),
        }));

        (self.status(), body).into_response()
    }
}

impl From<tokio_postgres::Error> for ApiError {
    fn from(err: tokio_postgres::Error) -> Self {
        match err.code() {
            Some(&SqlState::UNIQUE_VIOLATION) => {
                let constraint = err
                    .as_db_error()
                    .and_then(|db| db.constraint())
                    .unwrap_or_default()
                    .to_string();
                ApiError::Conflict(unique_violation_message(&constraint).to_string())
            }
            Some(&SqlState::FOREIGN_KEY_VIOLATION) => {
                ApiError::Validation("Referenced resource does not exist".to_string())
            }
            Some(&SqlState::NOT_NULL_VIOLATION) => {
                ApiError::Validation("Required field is missing".to_string())
            }
            Some(&SqlState::CHECK_VIOLATION) => {
                ApiError::Validation("Data validation constraint violated".to_string())
            }
            Some(&SqlState::STRING_DATA_RIGHT_TRUNCATION) => {
                ApiError::Validation("Text data exceeds maximum length".to_string())
            }
            Some(&SqlState::CONNECTION_EXCEPTION)
            | Some(&SqlState::CONNECTION_DOES_NOT_EXIST)
            | Some(&SqlState::CONNECTION_FAILURE) => {
                tracing::error!("PostgreSQL connection error: {}", err);
                ApiError::Database("Database connection unavailable".to_string())
            }
            _ => {
                tracing::error!("Unhandled PostgreSQL error: {} (code: {:?})", err, err.code());
                ApiError::Database("Database operation failed".to_string())
            }
        }
    }
}

impl From<deadpool_postgres::PoolError> for ApiError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        match err {
            deadpool_postgres::PoolError::Timeout(_) => {
                tracing::warn!("Database connection pool timeout: {}", err);
                ApiError::Database("Database connection timeout".to_string())
            }
            deadpool_postgres::PoolError::Closed => {
                tracing::error!("Database connection pool is closed");
                ApiError::Database("Database service unavailable".to_string())
            }
            _ => {
                tracing::error!("Database connection pool error: {}", err);
                ApiError::Database("Database connection unavailable".to_string())
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Upstream("Upstream service timed out".to_string())
        } else if err.is_decode() {
            ApiError::Upstream(format!("Upstream service sent an unreadable response: {}", err))
        } else {
            ApiError::Upstream(format!("Upstream service unreachable: {}", err))
        }
    }
}

fn unique_violation_message(constraint: &str) -> &'static str {
    match constraint {
        "user_profiles_email_key" => "Email address already exists",
        "user_profiles_auth_user_id_key" => "Profile already exists for this account",
        "cards_deck_id_sense_id_key" => "This card is already in the deck",
        _ => "Resource already exists",
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_exposes_message_as_detail() {
        let (status, body) = body_json(ApiError::validation("Word cannot be empty")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Word cannot be empty");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_not_found_detail_names_resource() {
        let (status, body) = body_json(ApiError::not_found("Deck 7")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Deck 7 not found");
    }

    #[tokio::test]
    async fn test_database_error_hides_internal_details() {
        let (status, body) =
            body_json(ApiError::Database("relation \"cards\" does not exist".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "A database error occurred");
        assert_eq!(body["code"], "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn test_internal_error_is_generic() {
        let (status, body) = body_json(ApiError::from(anyhow::anyhow!("secret stack"))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "An internal server error occurred");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::conflict("x").status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::unauthorized("x").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Forbidden("x".into()).status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::upstream("x").status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_unique_violation_messages() {
        assert_eq!(
            unique_violation_message("cards_deck_id_sense_id_key"),
            "This card is already in the deck"
        );
        assert_eq!(
            unique_violation_message("user_profiles_email_key"),
            "Email address already exists"
        );
        assert_eq!(unique_violation_message("other"), "Resource already exists");
    }
}
