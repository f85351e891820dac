// Request/response types shared by the server and the client

pub mod card;
pub mod deck;
pub mod lang_profile;
pub mod sentence;
pub mod user_profile;

pub use card::{Card, CreateCardRequest, Sense, SenseText};
pub use deck::{CreateDeckRequest, Deck, DeckSummary};
pub use lang_profile::{CreateLangProfileRequest, LangProfile};
pub use sentence::{GenerateSentenceRequest, SentenceRecord};
pub use user_profile::{CreateUserProfileRequest, UserProfile};

/// Required text field: non-empty after trimming and at most `max` characters.
pub(crate) fn validate_text(field: &str, value: &str, max: usize) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{} cannot be empty", field));
    }
    if value.chars().count() > max {
        return Err(format!("{} cannot exceed {} characters", field, max));
    }
    Ok(())
}
