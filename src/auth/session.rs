use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user_profile::is_valid_email;

/// The account as the auth provider knows it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

/// A signed-in session issued by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: i64,
    /// Unix timestamp (seconds). Filled from `expires_in` when the provider omits it.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: AuthUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    pub fn with_expiry(mut self) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = Some(Utc::now().timestamp() + self.expires_in);
        }
        self
    }

    /// True once the access token is past its expiry, minus `leeway_secs`.
    pub fn is_expired(&self, leeway_secs: i64) -> bool {
        match self.expires_at {
            Some(at) => Utc::now().timestamp() + leeway_secs >= at,
            None => false,
        }
    }
}

/// Result of a sign-up. Providers with email confirmation enabled return the
/// new account without a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignUpResponse {
    pub session: Option<Session>,
    pub user: AuthUser,
    pub message: Option<String>,
}

pub const CONFIRM_EMAIL_MESSAGE: &str = "Check your email to confirm your account.";

impl SignUpResponse {
    pub fn signed_in(session: Session) -> Self {
        SignUpResponse {
            user: session.user.clone(),
            session: Some(session),
            message: None,
        }
    }

    pub fn confirmation_required(user: AuthUser) -> Self {
        SignUpResponse {
            session: None,
            user,
            message: Some(CONFIRM_EMAIL_MESSAGE.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Sign-in needs a well-formed email and a password. Length rules are
    /// only enforced at sign-up.
    pub fn validate_sign_in(&self) -> Result<(), String> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err("Email cannot be empty".to_string());
        }
        if !is_valid_email(email) {
            return Err("Invalid email format".to_string());
        }
        if self.password.is_empty() {
            return Err("Password cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn validate_sign_up(&self) -> Result<(), String> {
        self.validate_sign_in()?;
        if self.password.chars().count() < 6 {
            return Err("Password must be at least 6 characters".to_string());
        }
        Ok(())
    }

    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}
