use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate_text;

/// A word/translation pair. Senses are shared: two decks holding the same
/// pair point at one sense row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sense {
    pub id: i64,
    pub word: String,
    pub translation: String,
}

/// The word/translation shown on the back of a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SenseText {
    pub word: String,
    pub translation: String,
}

/// A card as served to the study view: the sense it teaches and the most
/// recently generated example sentence, if any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: i64,
    pub deck_id: i64,
    pub sense_id: i64,
    pub current_sentence: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "senses")]
    pub sense: SenseText,
}

impl Card {
    pub fn has_sentence(&self) -> bool {
        self.current_sentence
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub word: String,
    pub translation: String,
}

impl CreateCardRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_text("Word", &self.word, 200)?;
        validate_text("Translation", &self.translation, 200)
    }

    pub fn normalized_word(&self) -> String {
        self.word.trim().to_string()
    }

    pub fn normalized_translation(&self) -> String {
        self.translation.trim().to_string()
    }
}
