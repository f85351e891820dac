use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate_text;

/// One generated example sentence, kept so learners can look back at the
/// contexts a word has appeared in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SentenceRecord {
    pub id: i64,
    pub user_id: i64,
    pub sense_id: i64,
    pub language: String,
    pub sentence: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSentenceRequest {
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for GenerateSentenceRequest {
    fn default() -> Self {
        GenerateSentenceRequest {
            language: default_language(),
        }
    }
}

impl GenerateSentenceRequest {
    /// Reads an optional JSON body. Only a missing or blank body falls back
    /// to the default language; anything else has to parse.
    pub fn from_body(body: &[u8]) -> Result<Self, String> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| format!("Invalid request body: {}", e))
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_text("Language", &self.language, 16)
    }

    pub fn normalized_language(&self) -> String {
        self.language.trim().to_lowercase()
    }
}
