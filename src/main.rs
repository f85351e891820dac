use axum::{
    routing::{delete, get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tracing::{error, info};

use vocario::{
    auth::AuthClient,
    config::Config,
    db::Database,
    handlers::{auth, cards, decks, health_check, lang_profiles, sentences, users},
    middleware::{create_middleware_stack, init_tracing},
    sentences::SentenceGenerator,
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize tracing: {}", e);
        std::process::exit(1);
    }

    let config = match Config::from_env() {
        Ok(config) => {
            info!(
                "Configuration loaded (production: {})",
                config.environment.is_production()
            );
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    let database = match Database::new(config.database.clone()).await {
        Ok(db) => {
            info!("Database connection established");
            Arc::new(db)
        }
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = database.migrate().await {
        error!("Failed to run database migrations: {}", e);
        std::process::exit(1);
    }

    let auth = match AuthClient::new(&config.auth) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to build auth provider client: {}", e);
            std::process::exit(1);
        }
    };

    let sentences = match SentenceGenerator::from_config(&config.llm) {
        Ok(generator) => Arc::new(generator),
        Err(e) => {
            error!("Failed to build sentence generator: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState {
        db: database,
        auth,
        sentences,
        context_words: config.llm.context_words,
    };
    let app = create_router(state, config.request_timeout);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            info!("Server listening on {}", addr);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    info!("Server shutdown complete");
}

fn create_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Auth provider pass-through
        .route("/auth/sign-up", post(auth::sign_up))
        .route("/auth/sign-in", post(auth::sign_in))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/sign-out", post(auth::sign_out))
        // Profiles
        .route("/me", get(users::me))
        .route("/userProfiles", post(users::create_user_profile))
        .route("/users/:user_id/langProfile", post(lang_profiles::create_lang_profile))
        .route("/users/:user_id/langProfiles", get(lang_profiles::list_lang_profiles))
        // Decks and cards
        .route(
            "/langProfile/:lang_profile_id/decks",
            post(decks::create_deck).get(decks::list_decks),
        )
        .route("/decks/:deck_id", get(decks::get_deck).delete(decks::delete_deck))
        .route(
            "/decks/:deck_id/cards",
            get(cards::list_cards).post(cards::create_card),
        )
        .route("/decks/:deck_id/cards/:card_id", delete(cards::delete_card))
        // Sentences
        .route(
            "/users/:user_id/senses/:sense_id/sentence_history",
            post(sentences::generate_sentence).get(sentences::sentence_history),
        )
        .with_state(state)
        .layer(create_middleware_stack(request_timeout))
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
