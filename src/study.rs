//! Flip-card study flow over one deck.
//!
//! The front of a card shows a generated example sentence, the back shows the
//! word and its translation. Whenever the current card has no sentence yet,
//! [`StudySession::sentence_request`] asks for one; only one generation is in
//! flight at a time.

use tracing::{debug, warn};

use crate::{
    client::{ApiClient, ClientError},
    models::Card,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Example sentence.
    Front,
    /// Word and translation.
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the current card.
    pub position: usize,
    pub total: usize,
    pub percent: u32,
}

/// A sentence the caller should generate: for the card at `index`, teaching `sense_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceRequest {
    pub index: usize,
    pub sense_id: i64,
}

#[derive(Debug, Clone)]
pub struct StudySession {
    cards: Vec<Card>,
    index: usize,
    face: Face,
    user_id: Option<i64>,
    language: String,
    generating: bool,
    sentence_error: Option<String>,
}

impl StudySession {
    pub fn new(cards: Vec<Card>) -> Self {
        StudySession {
            cards,
            index: 0,
            face: Face::Front,
            user_id: None,
            language: "en".to_string(),
            generating: false,
            sentence_error: None,
        }
    }

    /// Fetches a deck's cards and starts at the first one.
    pub async fn load(client: &ApiClient, deck_id: i64, user_id: i64) -> Result<Self, ClientError> {
        let cards = client.list_cards(deck_id).await?;
        debug!("Loaded {} cards for deck {}", cards.len(), deck_id);
        Ok(Self::new(cards).with_user(user_id))
    }

    pub fn with_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sentences are only generated for a known user.
    pub fn set_user(&mut self, user_id: Option<i64>) {
        self.user_id = user_id;
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.cards.get(self.index)
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn flip(&mut self) {
        self.face = match self.face {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        };
    }

    pub fn can_go_previous(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.index + 1 < self.cards.len()
    }

    /// Moves forward one card; stays put on the last card. Returns whether it moved.
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        self.index += 1;
        self.face = Face::Front;
        true
    }

    pub fn previous(&mut self) -> bool {
        if !self.can_go_previous() {
            return false;
        }
        self.index -= 1;
        self.face = Face::Front;
        true
    }

    pub fn progress(&self) -> Option<Progress> {
        if self.cards.is_empty() {
            return None;
        }
        let position = self.index + 1;
        let total = self.cards.len();
        // Rounds half up.
        let percent = ((position * 200 + total) / (2 * total)) as u32;
        Some(Progress {
            position,
            total,
            percent,
        })
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn sentence_error(&self) -> Option<&str> {
        self.sentence_error.as_deref()
    }

    /// The generation to start for the current card, if any. Marks the
    /// generation as in flight; finish it with `apply_sentence` or `sentence_failed`.
    pub fn sentence_request(&mut self) -> Option<SentenceRequest> {
        self.user_id?;
        if self.generating {
            return None;
        }

        let card = self.current_card()?;
        if card.has_sentence() {
            return None;
        }

        let request = SentenceRequest {
            index: self.index,
            sense_id: card.sense_id,
        };
        self.generating = true;
        self.sentence_error = None;
        Some(request)
    }

    /// Stores a generated sentence on the card it was requested for, which may
    /// no longer be the current one.
    pub fn apply_sentence(&mut self, index: usize, sentence: String) {
        self.generating = false;
        match self.cards.get_mut(index) {
            Some(card) => card.current_sentence = Some(sentence),
            None => warn!("Dropping sentence for card index {} outside the deck", index),
        }
    }

    /// The card keeps no sentence, so coming back to it asks again.
    pub fn sentence_failed(&mut self, error: impl Into<String>) {
        self.generating = false;
        self.sentence_error = Some(error.into());
    }

    /// Runs one auto-trigger round trip. Returns whether a sentence was fetched.
    pub async fn ensure_sentence(&mut self, client: &ApiClient) -> Result<bool, ClientError> {
        let Some(user_id) = self.user_id else {
            return Ok(false);
        };
        let Some(request) = self.sentence_request() else {
            return Ok(false);
        };

        match client
            .generate_sentence(user_id, request.sense_id, &self.language)
            .await
        {
            Ok(record) => {
                self.apply_sentence(request.index, record.sentence);
                Ok(true)
            }
            Err(e) => {
                self.sentence_failed(e.to_string());
                Err(e)
            }
        }
    }
}
