use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate_text;

/// A language a learner is studying, with their level and why they study it.
/// Decks hang off a language profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LangProfile {
    pub id: i64,
    pub user_id: i64,
    pub lang: String,
    pub level: String,
    pub purpose: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLangProfileRequest {
    pub lang: String,
    pub level: String,
    pub purpose: String,
}

impl CreateLangProfileRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_text("Language", &self.lang, 32)?;
        validate_text("Level", &self.level, 32)?;
        validate_text("Purpose", &self.purpose, 500)
    }

    /// Trimmed copy ready for storage.
    pub fn normalized(&self) -> Self {
        CreateLangProfileRequest {
            lang: self.lang.trim().to_string(),
            level: self.level.trim().to_string(),
            purpose: self.purpose.trim().to_string(),
        }
    }
}
