use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate_text;

/// A named collection of cards inside one language profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deck {
    pub id: i64,
    pub lang_profile_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Deck listing row; carries the number of cards so a deck overview can be
/// rendered without fetching every card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeckSummary {
    #[serde(flatten)]
    pub deck: Deck,
    pub card_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeckRequest {
    pub name: String,
}

impl CreateDeckRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_text("Deck name", &self.name, 100)
    }

    pub fn normalized_name(&self) -> String {
        self.name.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_deck_validation() {
        assert!(CreateDeckRequest { name: "Food".to_string() }.validate().is_ok());
        assert!(CreateDeckRequest { name: "\t".to_string() }.validate().is_err());
        assert!(CreateDeckRequest { name: "d".repeat(101) }.validate().is_err());
        assert!(CreateDeckRequest { name: "d".repeat(100) }.validate().is_ok());
    }

    #[test]
    fn test_deck_summary_flattens_deck_fields() {
        let summary = DeckSummary {
            deck: Deck {
                id: 4,
                lang_profile_id: 2,
                name: "Street food".to_string(),
                created_at: DateTime::parse_from_rfc3339("2025-03-01T12:00:00Z")
                    .unwrap()
                    .with_timezone(&Utc),
            },
            card_count: 12,
        };

        let value = serde_json::to_value(&summary).unwrap();
        assert_eq!(value["id"], 4);
        assert_eq!(value["name"], "Street food");
        assert_eq!(value["card_count"], 12);
        assert!(value.get("deck").is_none());
    }
}
