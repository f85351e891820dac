// Auth provider integration
// Accounts, passwords and token issuance live in a hosted GoTrue-compatible
// service. This module talks to its REST API and never sees password hashes.

pub mod extract;
pub mod session;

pub use extract::{Authenticated, CurrentProfile};
pub use session::{AuthUser, Credentials, RefreshRequest, Session, SignUpResponse};

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::{
    config::AuthConfig,
    error::{ApiError, ApiResult},
};

/// How a 4xx from the provider is reported to our callers.
#[derive(Debug, Clone, Copy)]
enum Rejection {
    /// Bad or expired token, wrong password.
    Unauthorized,
    /// The provider refused the input itself (weak password, taken email).
    Invalid,
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    email_redirect: Option<String>,
}

impl AuthClient {
    pub fn new(config: &AuthConfig) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("auth HTTP client: {}", e)))?;

        Ok(AuthClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            email_redirect: config.email_redirect.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> ApiResult<SignUpResponse> {
        let mut request = self
            .http
            .post(self.endpoint("signup"))
            .header("apikey", &self.api_key)
            .json(&json!({
                "email": credentials.normalized_email(),
                "password": credentials.password,
            }));
        if let Some(ref redirect) = self.email_redirect {
            request = request.query(&[("redirect_to", redirect)]);
        }

        let response = check(request.send().await?, Rejection::Invalid).await?;
        let body: Value = response.json().await?;

        // Auto-confirmed projects answer with a full session, others with the bare user.
        if body.get("access_token").is_some() {
            let session = serde_json::from_value::<Session>(body)
                .map_err(|e| ApiError::upstream(format!("Malformed session from auth provider: {}", e)))?
                .with_expiry();
            info!("Sign-up completed with immediate session for user {}", session.user.id);
            Ok(SignUpResponse::signed_in(session))
        } else {
            let user = serde_json::from_value::<AuthUser>(body)
                .map_err(|e| ApiError::upstream(format!("Malformed user from auth provider: {}", e)))?;
            info!("Sign-up for user {} awaiting email confirmation", user.id);
            Ok(SignUpResponse::confirmation_required(user))
        }
    }

    pub async fn sign_in_with_password(&self, credentials: &Credentials) -> ApiResult<Session> {
        let response = self
            .http
            .post(self.endpoint("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.api_key)
            .json(&json!({
                "email": credentials.normalized_email(),
                "password": credentials.password,
            }))
            .send()
            .await?;

        let session = self.read_session(response).await?;
        info!("User {} signed in", session.user.id);
        Ok(session)
    }

    pub async fn refresh_session(&self, refresh_token: &str) -> ApiResult<Session> {
        if refresh_token.trim().is_empty() {
            return Err(ApiError::validation("Refresh token cannot be empty"));
        }

        let response = self
            .http
            .post(self.endpoint("token"))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.api_key)
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        let session = self.read_session(response).await?;
        debug!("Refreshed session for user {}", session.user.id);
        Ok(session)
    }

    /// Revokes the session behind `access_token` at the provider.
    pub async fn sign_out(&self, access_token: &str) -> ApiResult<()> {
        let response = self
            .http
            .post(self.endpoint("logout"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        check(response, Rejection::Unauthorized).await?;
        Ok(())
    }

    /// Resolves an access token to the account it belongs to. Used to
    /// authenticate every protected request.
    pub async fn get_user(&self, access_token: &str) -> ApiResult<AuthUser> {
        let response = self
            .http
            .get(self.endpoint("user"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        let response = check(response, Rejection::Unauthorized).await?;
        response
            .json::<AuthUser>()
            .await
            .map_err(ApiError::from)
    }

    async fn read_session(&self, response: Response) -> ApiResult<Session> {
        let response = check(response, Rejection::Unauthorized).await?;
        let session = response.json::<Session>().await?;
        Ok(session.with_expiry())
    }
}

/// Passes successful responses through and turns failures into `ApiError`s
/// carrying the provider's own message.
async fn check(response: Response, rejection: Rejection) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = provider_message(&body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Auth provider error")
            .to_string()
    });

    if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
        debug!("Auth provider rejected request ({}): {}", status, message);
        Err(match rejection {
            Rejection::Unauthorized => ApiError::unauthorized(message),
            Rejection::Invalid => ApiError::validation(message),
        })
    } else {
        warn!("Auth provider failure ({}): {}", status, message);
        Err(ApiError::upstream(format!("Auth provider error: {}", message)))
    }
}

#[derive(Debug, Default, Deserialize)]
struct ProviderError {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

/// Auth providers are inconsistent about where the human-readable text goes.
fn provider_message(body: &str) -> Option<String> {
    let parsed: ProviderError = serde_json::from_str(body).ok()?;
    parsed
        .error_description
        .or(parsed.msg)
        .or(parsed.message)
        .or(parsed.error)
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_message_precedence() {
        assert_eq!(
            provider_message(r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            Some("Invalid login credentials".to_string())
        );
        assert_eq!(
            provider_message(r#"{"code":422,"msg":"User already registered"}"#),
            Some("User already registered".to_string())
        );
        assert_eq!(
            provider_message(r#"{"message":"JWT expired"}"#),
            Some("JWT expired".to_string())
        );
        assert_eq!(provider_message(r#"{"error":""}"#), None);
        assert_eq!(provider_message("<html>bad gateway</html>"), None);
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = AuthClient::new(&AuthConfig {
            base_url: "https://auth.example.com/".to_string(),
            api_key: "anon".to_string(),
            email_redirect: None,
            timeout: std::time::Duration::from_secs(15),
        })
        .unwrap();

        assert_eq!(client.endpoint("token"), "https://auth.example.com/auth/v1/token");
    }
}
