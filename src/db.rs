use crate::auth::AuthUser;
use crate::config::DatabaseConfig;
use crate::error::ApiError;
use crate::models::{
    card::{Card, CreateCardRequest, Sense, SenseText},
    deck::{CreateDeckRequest, Deck, DeckSummary},
    lang_profile::{CreateLangProfileRequest, LangProfile},
    sentence::SentenceRecord,
    user_profile::{default_username, CreateUserProfileRequest, UserProfile},
};
use deadpool_postgres::{Config, Object, Pool, Runtime};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio_postgres::Row;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Repository over a deadpool-managed PostgreSQL pool.
/// Every method that touches a learner's data takes the caller's profile id
/// and filters on it, so rows owned by someone else read as "not found".
#[derive(Clone)]
pub struct Database {
    pool: Pool,
}

const PROFILE_COLUMNS: &str = "id, auth_user_id, email, username, created_at";
const LANG_PROFILE_COLUMNS: &str = "id, user_id, lang, level, purpose, created_at";
const HISTORY_COLUMNS: &str = "id, user_id, sense_id, language, sentence, created_at";

const MIGRATIONS: &[(&str, &str)] = &[
    (
        "user_profiles table",
        r#"
        CREATE TABLE IF NOT EXISTS user_profiles (
            id BIGSERIAL PRIMARY KEY,
            auth_user_id UUID UNIQUE,
            email VARCHAR(255) NOT NULL UNIQUE,
            username VARCHAR(50) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "lang_profiles table",
        r#"
        CREATE TABLE IF NOT EXISTS lang_profiles (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES user_profiles(id) ON DELETE CASCADE,
            lang VARCHAR(32) NOT NULL,
            level VARCHAR(32) NOT NULL,
            purpose VARCHAR(500) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "lang_profiles user index",
        "CREATE INDEX IF NOT EXISTS idx_lang_profiles_user_id ON lang_profiles(user_id)",
    ),
    (
        "decks table",
        r#"
        CREATE TABLE IF NOT EXISTS decks (
            id BIGSERIAL PRIMARY KEY,
            lang_profile_id BIGINT NOT NULL REFERENCES lang_profiles(id) ON DELETE CASCADE,
            name VARCHAR(100) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "decks lang_profile index",
        "CREATE INDEX IF NOT EXISTS idx_decks_lang_profile_id ON decks(lang_profile_id)",
    ),
    (
        "senses table",
        r#"
        CREATE TABLE IF NOT EXISTS senses (
            id BIGSERIAL PRIMARY KEY,
            word VARCHAR(200) NOT NULL,
            translation VARCHAR(200) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (word, translation)
        )
        "#,
    ),
    (
        "cards table",
        r#"
        CREATE TABLE IF NOT EXISTS cards (
            id BIGSERIAL PRIMARY KEY,
            deck_id BIGINT NOT NULL REFERENCES decks(id) ON DELETE CASCADE,
            sense_id BIGINT NOT NULL REFERENCES senses(id),
            current_sentence TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            UNIQUE (deck_id, sense_id)
        )
        "#,
    ),
    (
        "cards sense index",
        "CREATE INDEX IF NOT EXISTS idx_cards_sense_id ON cards(sense_id)",
    ),
    (
        "sentence_history table",
        r#"
        CREATE TABLE IF NOT EXISTS sentence_history (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES user_profiles(id) ON DELETE CASCADE,
            sense_id BIGINT NOT NULL REFERENCES senses(id) ON DELETE CASCADE,
            language VARCHAR(16) NOT NULL,
            sentence TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "sentence_history lookup index",
        "CREATE INDEX IF NOT EXISTS idx_sentence_history_user_sense ON sentence_history(user_id, sense_id, created_at DESC)",
    ),
];

impl Database {
    /// Builds the pool and checks that a connection can actually be made.
    pub async fn new(config: DatabaseConfig) -> Result<Self, ApiError> {
        info!(
            "Creating PostgreSQL connection pool for host: {}:{}",
            config.host, config.port
        );

        let pool = Self::create_pool(config)?;
        let db = Database { pool };
        db.health_check().await?;

        Ok(db)
    }

    /// A pool that has not been checked, for tests that must not reach
    /// a database.
    #[cfg(test)]
    pub(crate) fn unconnected(config: DatabaseConfig) -> Result<Self, ApiError> {
        Ok(Database {
            pool: Self::create_pool(config)?,
        })
    }

    fn create_pool(config: DatabaseConfig) -> Result<Pool, ApiError> {
        let mut pg_config = Config::new();

        pg_config.host = Some(config.host);
        pg_config.port = Some(config.port);
        pg_config.dbname = Some(config.database);
        pg_config.user = Some(config.username);
        pg_config.password = Some(config.password);
        pg_config.connect_timeout = Some(config.connection_timeout);

        pg_config.ssl_mode = Some(match config.ssl_mode.as_str() {
            "disable" => deadpool_postgres::SslMode::Disable,
            "require" => deadpool_postgres::SslMode::Require,
            "prefer" => deadpool_postgres::SslMode::Prefer,
            other => {
                warn!("Unknown SSL mode '{}', defaulting to 'prefer'", other);
                deadpool_postgres::SslMode::Prefer
            }
        });

        pg_config.manager = Some(deadpool_postgres::ManagerConfig {
            recycling_method: deadpool_postgres::RecyclingMethod::Fast,
        });

        let mut pool_config = deadpool_postgres::PoolConfig::new(config.max_connections as usize);
        pool_config.timeouts.wait = Some(config.connection_timeout);
        pg_config.pool = Some(pool_config);

        let tls_connector = TlsConnector::builder().build().map_err(|e| {
            error!("Failed to create TLS connector: {}", e);
            ApiError::Database(format!("TLS connector creation failed: {}", e))
        })?;
        let tls = MakeTlsConnector::new(tls_connector);

        pg_config
            .create_pool(Some(Runtime::Tokio1), tls)
            .map_err(|e| {
                error!("Failed to create connection pool: {}", e);
                ApiError::Database(format!("Connection pool creation failed: {}", e))
            })
    }

    async fn get_connection(&self) -> Result<Object, ApiError> {
        self.pool.get().await.map_err(ApiError::from)
    }

    pub async fn health_check(&self) -> Result<(), ApiError> {
        let client = self.get_connection().await?;

        client.execute("SELECT 1", &[]).await.map_err(|e| {
            error!("Database health check failed: {}", e);
            ApiError::Database(format!("Health check failed: {}", e))
        })?;

        Ok(())
    }

    /// Creates the schema. Every statement is idempotent, so this runs on each start.
    pub async fn migrate(&self) -> Result<(), ApiError> {
        info!("Running database migrations");

        let client = self.get_connection().await?;
        for (name, statement) in MIGRATIONS {
            client.execute(*statement, &[]).await.map_err(|e| {
                error!("Migration step '{}' failed: {}", name, e);
                ApiError::Database(format!("Migration '{}' failed: {}", name, e))
            })?;
        }

        info!("Applied {} migration steps", MIGRATIONS.len());
        Ok(())
    }

    // User profiles

    pub async fn create_user_profile(
        &self,
        request: CreateUserProfileRequest,
    ) -> Result<UserProfile, ApiError> {
        request.validate().map_err(ApiError::Validation)?;

        let client = self.get_connection().await?;
        let query = format!(
            "INSERT INTO user_profiles (email, username) VALUES ($1, $2) RETURNING {}",
            PROFILE_COLUMNS
        );
        let row = client
            .query_one(
                &query,
                &[&request.normalized_email(), &request.normalized_username()],
            )
            .await?;

        let profile = profile_from_row(&row);
        info!("Created user profile with id: {}", profile.id);
        Ok(profile)
    }

    pub async fn get_profile_by_id(&self, id: i64) -> Result<UserProfile, ApiError> {
        let client = self.get_connection().await?;
        let query = format!("SELECT {} FROM user_profiles WHERE id = $1", PROFILE_COLUMNS);

        client
            .query_opt(&query, &[&id])
            .await?
            .map(|row| profile_from_row(&row))
            .ok_or_else(|| ApiError::not_found(format!("User profile {}", id)))
    }

    /// Resolves an auth provider account to its profile. A profile already
    /// holding the account's email is linked to it, even when it was linked
    /// to an older account with that email; otherwise a new one is made.
    pub async fn get_or_create_profile(&self, user: &AuthUser) -> Result<UserProfile, ApiError> {
        let mut client = self.get_connection().await?;

        let select = format!(
            "SELECT {} FROM user_profiles WHERE auth_user_id = $1",
            PROFILE_COLUMNS
        );
        if let Some(row) = client.query_opt(&select, &[&user.id]).await? {
            return Ok(profile_from_row(&row));
        }

        let email = user
            .email
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ApiError::unauthorized("Account has no email address"))?;

        let tx = client.transaction().await?;
        let existing = tx
            .query_opt(
                "SELECT auth_user_id FROM user_profiles WHERE email = $1 FOR UPDATE",
                &[&email],
            )
            .await?
            .map(|row| row.get::<_, Option<Uuid>>("auth_user_id"));

        let link = ProfileLink::for_existing(existing);
        let row = match link {
            ProfileLink::Create => {
                // Two first requests can race; the conflict arm turns the loser into a read.
                let insert = format!(
                    r#"
                    INSERT INTO user_profiles (auth_user_id, email, username)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (auth_user_id) DO UPDATE SET auth_user_id = EXCLUDED.auth_user_id
                    RETURNING {}
                    "#,
                    PROFILE_COLUMNS
                );
                tx.query_one(&insert, &[&user.id, &email, &default_username(&email)])
                    .await?
            }
            ProfileLink::Link | ProfileLink::Relink { .. } => {
                let update = format!(
                    "UPDATE user_profiles SET auth_user_id = $1 WHERE email = $2 RETURNING {}",
                    PROFILE_COLUMNS
                );
                tx.query_one(&update, &[&user.id, &email]).await?
            }
        };
        tx.commit().await?;

        let profile = profile_from_row(&row);
        match link {
            ProfileLink::Create => {
                info!("Created user profile {} for account {}", profile.id, user.id)
            }
            ProfileLink::Link => {
                info!("Linked user profile {} to account {}", profile.id, user.id)
            }
            ProfileLink::Relink { previous } => warn!(
                "Re-linked user profile {} from account {} to account {}",
                profile.id, previous, user.id
            ),
        }
        Ok(profile)
    }

    // Language profiles

    pub async fn create_lang_profile(
        &self,
        user_id: i64,
        request: CreateLangProfileRequest,
    ) -> Result<LangProfile, ApiError> {
        request.validate().map_err(ApiError::Validation)?;
        let request = request.normalized();

        let client = self.get_connection().await?;
        let query = format!(
            "INSERT INTO lang_profiles (user_id, lang, level, purpose) VALUES ($1, $2, $3, $4) RETURNING {}",
            LANG_PROFILE_COLUMNS
        );
        let row = client
            .query_one(
                &query,
                &[&user_id, &request.lang, &request.level, &request.purpose],
            )
            .await?;

        let profile = lang_profile_from_row(&row);
        info!(
            "Created language profile {} ({}) for user {}",
            profile.id, profile.lang, user_id
        );
        Ok(profile)
    }

    pub async fn list_lang_profiles(&self, user_id: i64) -> Result<Vec<LangProfile>, ApiError> {
        let client = self.get_connection().await?;
        let query = format!(
            "SELECT {} FROM lang_profiles WHERE user_id = $1 ORDER BY created_at, id",
            LANG_PROFILE_COLUMNS
        );
        let rows = client.query(&query, &[&user_id]).await?;

        Ok(rows.iter().map(lang_profile_from_row).collect())
    }

    async fn ensure_lang_profile_owner(
        &self,
        client: &Object,
        owner: i64,
        lang_profile_id: i64,
    ) -> Result<(), ApiError> {
        let row = client
            .query_opt(
                "SELECT 1 FROM lang_profiles WHERE id = $1 AND user_id = $2",
                &[&lang_profile_id, &owner],
            )
            .await?;

        match row {
            Some(_) => Ok(()),
            None => Err(ApiError::not_found(format!(
                "Language profile {}",
                lang_profile_id
            ))),
        }
    }

    // Decks

    pub async fn create_deck(
        &self,
        owner: i64,
        lang_profile_id: i64,
        request: CreateDeckRequest,
    ) -> Result<Deck, ApiError> {
        request.validate().map_err(ApiError::Validation)?;

        let client = self.get_connection().await?;
        self.ensure_lang_profile_owner(&client, owner, lang_profile_id)
            .await?;

        let row = client
            .query_one(
                "INSERT INTO decks (lang_profile_id, name) VALUES ($1, $2) RETURNING id, lang_profile_id, name, created_at",
                &[&lang_profile_id, &request.normalized_name()],
            )
            .await?;

        let deck = deck_from_row(&row);
        info!("Created deck {} in language profile {}", deck.id, lang_profile_id);
        Ok(deck)
    }

    pub async fn list_decks(
        &self,
        owner: i64,
        lang_profile_id: i64,
    ) -> Result<Vec<DeckSummary>, ApiError> {
        let client = self.get_connection().await?;
        self.ensure_lang_profile_owner(&client, owner, lang_profile_id)
            .await?;

        let query = r#"
            SELECT d.id, d.lang_profile_id, d.name, d.created_at, COUNT(c.id) AS card_count
            FROM decks d
            LEFT JOIN cards c ON c.deck_id = d.id
            WHERE d.lang_profile_id = $1
            GROUP BY d.id
            ORDER BY d.created_at, d.id
        "#;
        let rows = client.query(query, &[&lang_profile_id]).await?;

        Ok(rows
            .iter()
            .map(|row| DeckSummary {
                deck: deck_from_row(row),
                card_count: row.get(4),
            })
            .collect())
    }

    pub async fn get_deck(&self, owner: i64, deck_id: i64) -> Result<Deck, ApiError> {
        let client = self.get_connection().await?;
        Self::owned_deck(&client, owner, deck_id).await
    }

    pub async fn delete_deck(&self, owner: i64, deck_id: i64) -> Result<(), ApiError> {
        let client = self.get_connection().await?;
        let deleted = client
            .execute(
                r#"
                DELETE FROM decks d
                USING lang_profiles lp
                WHERE d.id = $1 AND lp.id = d.lang_profile_id AND lp.user_id = $2
                "#,
                &[&deck_id, &owner],
            )
            .await?;

        if deleted == 0 {
            return Err(ApiError::not_found(format!("Deck {}", deck_id)));
        }
        info!("Deleted deck {} (cards cascade)", deck_id);
        Ok(())
    }

    async fn owned_deck(client: &Object, owner: i64, deck_id: i64) -> Result<Deck, ApiError> {
        let row = client
            .query_opt(
                r#"
                SELECT d.id, d.lang_profile_id, d.name, d.created_at
                FROM decks d
                JOIN lang_profiles lp ON lp.id = d.lang_profile_id
                WHERE d.id = $1 AND lp.user_id = $2
                "#,
                &[&deck_id, &owner],
            )
            .await?;

        row.map(|row| deck_from_row(&row))
            .ok_or_else(|| ApiError::not_found(format!("Deck {}", deck_id)))
    }

    // Cards

    /// Cards in the order they were added, each joined with its sense.
    pub async fn list_cards(&self, owner: i64, deck_id: i64) -> Result<Vec<Card>, ApiError> {
        let client = self.get_connection().await?;
        Self::owned_deck(&client, owner, deck_id).await?;

        let rows = client
            .query(
                r#"
                SELECT c.id, c.deck_id, c.sense_id, c.current_sentence, c.created_at, s.word, s.translation
                FROM cards c
                JOIN senses s ON s.id = c.sense_id
                WHERE c.deck_id = $1
                ORDER BY c.created_at, c.id
                "#,
                &[&deck_id],
            )
            .await?;

        Ok(rows.iter().map(card_from_row).collect())
    }

    /// Reuses the sense for an existing (word, translation) pair and adds a
    /// card for it. Both writes happen in one transaction.
    pub async fn create_card(
        &self,
        owner: i64,
        deck_id: i64,
        request: CreateCardRequest,
    ) -> Result<Card, ApiError> {
        request.validate().map_err(ApiError::Validation)?;
        let word = request.normalized_word();
        let translation = request.normalized_translation();

        let mut client = self.get_connection().await?;
        Self::owned_deck(&client, owner, deck_id).await?;

        let tx = client.transaction().await?;

        let sense_row = tx
            .query_one(
                r#"
                INSERT INTO senses (word, translation) VALUES ($1, $2)
                ON CONFLICT (word, translation) DO UPDATE SET word = EXCLUDED.word
                RETURNING id
                "#,
                &[&word, &translation],
            )
            .await?;
        let sense_id: i64 = sense_row.get(0);

        let card_row = tx
            .query_one(
                r#"
                INSERT INTO cards (deck_id, sense_id) VALUES ($1, $2)
                RETURNING id, deck_id, sense_id, current_sentence, created_at
                "#,
                &[&deck_id, &sense_id],
            )
            .await?;

        tx.commit().await?;

        let card = Card {
            id: card_row.get(0),
            deck_id: card_row.get(1),
            sense_id: card_row.get(2),
            current_sentence: card_row.get(3),
            created_at: card_row.get(4),
            sense: SenseText { word, translation },
        };
        info!(
            "Created card {} (sense {}) in deck {}",
            card.id, card.sense_id, deck_id
        );
        Ok(card)
    }

    pub async fn delete_card(&self, owner: i64, deck_id: i64, card_id: i64) -> Result<(), ApiError> {
        let client = self.get_connection().await?;
        Self::owned_deck(&client, owner, deck_id).await?;

        let deleted = client
            .execute(
                "DELETE FROM cards WHERE id = $1 AND deck_id = $2",
                &[&card_id, &deck_id],
            )
            .await?;

        if deleted == 0 {
            return Err(ApiError::not_found(format!("Card {}", card_id)));
        }
        info!("Deleted card {} from deck {}", card_id, deck_id);
        Ok(())
    }

    // Senses and sentences

    /// A sense the user has at least one card for.
    pub async fn get_sense_for_user(&self, owner: i64, sense_id: i64) -> Result<Sense, ApiError> {
        let client = self.get_connection().await?;
        let row = client
            .query_opt(
                r#"
                SELECT s.id, s.word, s.translation
                FROM senses s
                WHERE s.id = $1 AND EXISTS (
                    SELECT 1 FROM cards c
                    JOIN decks d ON d.id = c.deck_id
                    JOIN lang_profiles lp ON lp.id = d.lang_profile_id
                    WHERE c.sense_id = s.id AND lp.user_id = $2
                )
                "#,
                &[&sense_id, &owner],
            )
            .await?;

        row.map(|row| Sense {
            id: row.get(0),
            word: row.get(1),
            translation: row.get(2),
        })
        .ok_or_else(|| ApiError::not_found(format!("Sense {}", sense_id)))
    }

    /// Most recently added words from the user's decks in the same language(s)
    /// as `sense_id`, excluding that sense.
    pub async fn known_words(
        &self,
        owner: i64,
        sense_id: i64,
        limit: usize,
    ) -> Result<Vec<String>, ApiError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let client = self.get_connection().await?;
        let rows = client
            .query(
                r#"
                SELECT word FROM (
                    SELECT s.word, MAX(c.created_at) AS added_at
                    FROM cards c
                    JOIN senses s ON s.id = c.sense_id
                    JOIN decks d ON d.id = c.deck_id
                    JOIN lang_profiles lp ON lp.id = d.lang_profile_id
                    WHERE lp.user_id = $1
                      AND s.id <> $2
                      AND lp.lang IN (
                          SELECT lp2.lang FROM cards c2
                          JOIN decks d2 ON d2.id = c2.deck_id
                          JOIN lang_profiles lp2 ON lp2.id = d2.lang_profile_id
                          WHERE c2.sense_id = $2 AND lp2.user_id = $1
                      )
                    GROUP BY s.word
                ) known
                ORDER BY added_at DESC
                LIMIT $3
                "#,
                &[&owner, &sense_id, &(limit as i64)],
            )
            .await?;

        Ok(rows.iter().map(|row| row.get(0)).collect())
    }

    /// Stores a generated sentence in the history and makes it the current
    /// sentence on every card of this user that teaches the sense.
    pub async fn record_sentence(
        &self,
        owner: i64,
        sense_id: i64,
        language: &str,
        sentence: &str,
    ) -> Result<SentenceRecord, ApiError> {
        let mut client = self.get_connection().await?;
        let tx = client.transaction().await?;

        let insert = format!(
            "INSERT INTO sentence_history (user_id, sense_id, language, sentence) VALUES ($1, $2, $3, $4) RETURNING {}",
            HISTORY_COLUMNS
        );
        let row = tx
            .query_one(&insert, &[&owner, &sense_id, &language, &sentence])
            .await?;

        let updated = tx
            .execute(
                r#"
                UPDATE cards SET current_sentence = $1
                WHERE sense_id = $2 AND deck_id IN (
                    SELECT d.id FROM decks d
                    JOIN lang_profiles lp ON lp.id = d.lang_profile_id
                    WHERE lp.user_id = $3
                )
                "#,
                &[&sentence, &sense_id, &owner],
            )
            .await?;

        tx.commit().await?;

        let record = history_from_row(&row);
        info!(
            "Recorded sentence {} for sense {} ({} cards updated)",
            record.id, sense_id, updated
        );
        Ok(record)
    }

    pub async fn sentence_history(
        &self,
        owner: i64,
        sense_id: i64,
    ) -> Result<Vec<SentenceRecord>, ApiError> {
        let client = self.get_connection().await?;
        let query = format!(
            "SELECT {} FROM sentence_history WHERE user_id = $1 AND sense_id = $2 ORDER BY created_at DESC, id DESC",
            HISTORY_COLUMNS
        );
        let rows = client.query(&query, &[&owner, &sense_id]).await?;

        Ok(rows.iter().map(history_from_row).collect())
    }
}

/// How an account without a profile gets one, given the `auth_user_id`
/// of the profile that already holds its email, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProfileLink {
    Create,
    /// Profile was made through `POST /userProfiles` and never claimed.
    Link,
    /// Profile belonged to an earlier account with the same email, e.g. one
    /// deleted and re-created at the provider.
    Relink { previous: Uuid },
}

impl ProfileLink {
    fn for_existing(existing: Option<Option<Uuid>>) -> Self {
        match existing {
            None => ProfileLink::Create,
            Some(None) => ProfileLink::Link,
            Some(Some(previous)) => ProfileLink::Relink { previous },
        }
    }
}

fn profile_from_row(row: &Row) -> UserProfile {
    UserProfile {
        id: row.get(0),
        auth_user_id: row.get(1),
        email: row.get(2),
        username: row.get(3),
        created_at: row.get(4),
    }
}

fn lang_profile_from_row(row: &Row) -> LangProfile {
    LangProfile {
        id: row.get(0),
        user_id: row.get(1),
        lang: row.get(2),
        level: row.get(3),
        purpose: row.get(4),
        created_at: row.get(5),
    }
}

fn deck_from_row(row: &Row) -> Deck {
    Deck {
        id: row.get(0),
        lang_profile_id: row.get(1),
        name: row.get(2),
        created_at: row.get(3),
    }
}

fn card_from_row(row: &Row) -> Card {
    Card {
        id: row.get(0),
        deck_id: row.get(1),
        sense_id: row.get(2),
        current_sentence: row.get(3),
        created_at: row.get(4),
        sense: SenseText {
            word: row.get(5),
            translation: row.get(6),
        },
    }
}

fn history_from_row(row: &Row) -> SentenceRecord {
    SentenceRecord {
        id: row.get(0),
        user_id: row.get(1),
        sense_id: row.get(2),
        language: row.get(3),
        sentence: row.get(4),
        created_at: row.get(5),
    }
}
