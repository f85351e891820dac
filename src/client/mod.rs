// Typed client for the Vocario REST API
// Used by front ends and by the study flow in `crate::study`.

pub mod session;

pub use session::{AuthEvent, SessionStore};

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::{
    auth::{Credentials, Session, SignUpResponse},
    models::{
        Card, CreateCardRequest, CreateDeckRequest, CreateLangProfileRequest,
        CreateUserProfileRequest, Deck, DeckSummary, LangProfile, SentenceRecord, UserProfile,
    },
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Sessions this close to expiry are refreshed before use.
const REFRESH_LEEWAY_SECS: i64 = 30;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with an error status; `detail` is its message.
    #[error("{detail}")]
    Api { status: StatusCode, detail: String },

    #[error("Not signed in")]
    NotSignedIn,

    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Invalid(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
    /// Held while a refresh is in flight so concurrent requests reuse its
    /// result instead of spending the same refresh token twice.
    refresh_lock: Arc<Mutex<()>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().build()?;
        Ok(ApiClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: SessionStore::new(),
            refresh_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    /// A request carrying the current access token, refreshing it first when
    /// it is about to expire.
    async fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let mut session = self.session.current().ok_or(ClientError::NotSignedIn)?;
        if session.is_expired(REFRESH_LEEWAY_SECS) {
            let _guard = self.refresh_lock.lock().await;
            // Another request may have refreshed while we waited.
            session = self.session.current().ok_or(ClientError::NotSignedIn)?;
            if session.is_expired(REFRESH_LEEWAY_SECS) {
                debug!("Access token expiring, refreshing before {}", path);
                session = self.refresh_with(session.refresh_token).await?;
            }
        }
        Ok(self.request(method, path).bearer_auth(session.access_token))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = check(request.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ClientError> {
        check(request.send().await?).await?;
        Ok(())
    }

    // Auth

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpResponse, ClientError> {
        let credentials = Credentials::new(email, password);
        credentials.validate_sign_up().map_err(ClientError::Invalid)?;

        let outcome: SignUpResponse = self
            .send(self.request(Method::POST, "/auth/sign-up").json(&credentials))
            .await?;
        if let Some(ref session) = outcome.session {
            self.session.set(session.clone());
        }
        Ok(outcome)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ClientError> {
        let credentials = Credentials::new(email, password);
        credentials.validate_sign_in().map_err(ClientError::Invalid)?;

        let session: Session = self
            .send(self.request(Method::POST, "/auth/sign-in").json(&credentials))
            .await?;
        self.session.set(session.clone());
        Ok(session)
    }

    pub async fn refresh(&self) -> Result<Session, ClientError> {
        let _guard = self.refresh_lock.lock().await;
        let refresh_token = self
            .session
            .current()
            .map(|s| s.refresh_token)
            .ok_or(ClientError::NotSignedIn)?;
        self.refresh_with(refresh_token).await
    }

    /// Callers hold `refresh_lock`.
    async fn refresh_with(&self, refresh_token: String) -> Result<Session, ClientError> {
        let result: Result<Session, ClientError> = self
            .send(
                self.request(Method::POST, "/auth/refresh")
                    .json(&json!({ "refresh_token": refresh_token })),
            )
            .await;

        match result {
            Ok(session) => {
                self.session.set(session.clone());
                Ok(session)
            }
            Err(e) => {
                // A rejected refresh token will never work again, but only
                // drop the session if it is still the one holding it.
                let still_current = self
                    .session
                    .current()
                    .is_some_and(|s| s.refresh_token == refresh_token);
                if e.status() == Some(StatusCode::UNAUTHORIZED) && still_current {
                    self.session.clear();
                }
                Err(e)
            }
        }
    }

    /// Ends the session. The local session is dropped even when the server
    /// cannot be reached.
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        let Some(session) = self.session.current() else {
            return Ok(());
        };

        let result = self
            .send_empty(
                self.request(Method::POST, "/auth/sign-out")
                    .bearer_auth(session.access_token),
            )
            .await;
        self.session.clear();
        result
    }

    // Profiles

    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        self.send(self.authed(Method::GET, "/me").await?).await
    }

    pub async fn create_user_profile(
        &self,
        request: &CreateUserProfileRequest,
    ) -> Result<UserProfile, ClientError> {
        request.validate().map_err(ClientError::Invalid)?;
        self.send(self.request(Method::POST, "/userProfiles").json(request))
            .await
    }

    pub async fn create_lang_profile(
        &self,
        user_id: i64,
        request: &CreateLangProfileRequest,
    ) -> Result<LangProfile, ClientError> {
        request.validate().map_err(ClientError::Invalid)?;
        let path = format!("/users/{}/langProfile", user_id);
        self.send(self.authed(Method::POST, &path).await?.json(request))
            .await
    }

    pub async fn list_lang_profiles(&self, user_id: i64) -> Result<Vec<LangProfile>, ClientError> {
        let path = format!("/users/{}/langProfiles", user_id);
        self.send(self.authed(Method::GET, &path).await?).await
    }

    // Decks

    pub async fn create_deck(
        &self,
        lang_profile_id: i64,
        request: &CreateDeckRequest,
    ) -> Result<Deck, ClientError> {
        request.validate().map_err(ClientError::Invalid)?;
        let path = format!("/langProfile/{}/decks", lang_profile_id);
        self.send(self.authed(Method::POST, &path).await?.json(request))
            .await
    }

    pub async fn list_decks(&self, lang_profile_id: i64) -> Result<Vec<DeckSummary>, ClientError> {
        let path = format!("/langProfile/{}/decks", lang_profile_id);
        self.send(self.authed(Method::GET, &path).await?).await
    }

    pub async fn get_deck(&self, deck_id: i64) -> Result<Deck, ClientError> {
        let path = format!("/decks/{}", deck_id);
        self.send(self.authed(Method::GET, &path).await?).await
    }

    pub async fn delete_deck(&self, deck_id: i64) -> Result<(), ClientError> {
        let path = format!("/decks/{}", deck_id);
        self.send_empty(self.authed(Method::DELETE, &path).await?)
            .await
    }

    // Cards

    pub async fn list_cards(&self, deck_id: i64) -> Result<Vec<Card>, ClientError> {
        let path = format!("/decks/{}/cards", deck_id);
        self.send(self.authed(Method::GET, &path).await?).await
    }

    pub async fn create_card(
        &self,
        deck_id: i64,
        request: &CreateCardRequest,
    ) -> Result<Card, ClientError> {
        request.validate().map_err(ClientError::Invalid)?;
        let path = format!("/decks/{}/cards", deck_id);
        self.send(self.authed(Method::POST, &path).await?.json(request))
            .await
    }

    pub async fn delete_card(&self, deck_id: i64, card_id: i64) -> Result<(), ClientError> {
        let path = format!("/decks/{}/cards/{}", deck_id, card_id);
        self.send_empty(self.authed(Method::DELETE, &path).await?)
            .await
    }

    // Sentences

    pub async fn generate_sentence(
        &self,
        user_id: i64,
        sense_id: i64,
        language: &str,
    ) -> Result<SentenceRecord, ClientError> {
        let path = format!("/users/{}/senses/{}/sentence_history", user_id, sense_id);
        self.send(
            self.authed(Method::POST, &path)
                .await?
                .json(&json!({ "language": language })),
        )
        .await
    }

    pub async fn sentence_history(
        &self,
        user_id: i64,
        sense_id: i64,
    ) -> Result<Vec<SentenceRecord>, ClientError> {
        let path = format!("/users/{}/senses/{}/sentence_history", user_id, sense_id);
        self.send(self.authed(Method::GET, &path).await?).await
    }
}

/// Turns error statuses into `ClientError::Api`, preferring the server's
/// `detail` message over the bare status text.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

    error!("API error ({}): {}", status, detail);
    Err(ClientError::Api { status, detail })
}
