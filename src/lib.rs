// Vocario: flashcard backend and client for language learners

pub mod auth;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod sentences;
pub mod state;
pub mod study;

// Re-export commonly used types
pub use client::{ApiClient, ClientError, SessionStore};
pub use db::Database;
pub use error::ApiError;
pub use models::{Card, Deck, LangProfile, SentenceRecord, UserProfile};
pub use study::StudySession;
