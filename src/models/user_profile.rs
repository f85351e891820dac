use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application-side record of a learner.
/// `auth_user_id` links it to the account held by the auth provider; profiles
/// created directly through `POST /userProfiles` may not have one yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: i64,
    pub auth_user_id: Option<Uuid>,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserProfileRequest {
    pub email: String,
    pub username: String,
}

impl CreateUserProfileRequest {
    pub fn validate(&self) -> Result<(), String> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err("Email cannot be empty".to_string());
        }
        if email.len() > 255 {
            return Err("Email cannot exceed 255 characters".to_string());
        }
        if !is_valid_email(email) {
            return Err("Invalid email format".to_string());
        }

        validate_username(&self.username)
    }

    pub fn normalized_email(&self) -> String {
        self.email.trim().to_lowercase()
    }

    pub fn normalized_username(&self) -> String {
        self.username.trim().to_string()
    }
}

pub fn validate_username(username: &str) -> Result<(), String> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.chars().count() > 50 {
        return Err("Username cannot exceed 50 characters".to_string());
    }
    Ok(())
}

/// Username given to a profile created implicitly on first sign-in:
/// the local part of the email address.
pub fn default_username(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default().trim();
    if local.is_empty() {
        "learner".to_string()
    } else {
        local.chars().take(50).collect()
    }
}

/// Minimal structural email check: one `@`, a dotted domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.len() > 253 {
        return false;
    }
    if domain.contains('@') || !domain.contains('.') {
        return false;
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }

    local.chars().all(|c| c.is_alphanumeric() || ".-_+".contains(c))
        && domain.chars().all(|c| c.is_alphanumeric() || ".-".contains(c))
}
