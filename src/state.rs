use std::sync::Arc;

use crate::{auth::AuthClient, db::Database, sentences::SentenceGenerator};

/// Shared handles passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth: Arc<AuthClient>,
    pub sentences: Arc<SentenceGenerator>,
    /// How many previously learned words are offered to the generator as context.
    pub context_words: usize,
}

#[cfg(test)]
impl AppState {
    /// Every collaborator points at a closed port, so any call through them
    /// fails.
    pub(crate) fn unreachable() -> Self {
        use crate::config::{AuthConfig, DatabaseConfig};
        use std::time::Duration;

        let database = Database::unconnected(DatabaseConfig {
            host: "127.0.0.1".to_string(),
            port: 9,
            database: "vocario".to_string(),
            username: "vocario".to_string(),
            password: "vocario".to_string(),
            ssl_mode: "disable".to_string(),
            max_connections: 1,
            connection_timeout: Duration::from_secs(1),
        })
        .unwrap();
        let auth = AuthClient::new(&AuthConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            api_key: "anon".to_string(),
            email_redirect: None,
            timeout: Duration::from_secs(1),
        })
        .unwrap();

        AppState {
            db: Arc::new(database),
            auth: Arc::new(auth),
            sentences: Arc::new(SentenceGenerator::Template),
            context_words: 5,
        }
    }
}
