// API client and study flow against an in-process mock of the REST API

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};
use vocario::{
    client::{ApiClient, AuthEvent, ClientError},
    models::CreateCardRequest,
    study::StudySession,
};

const USER_ID: &str = "6f1c2a9e-3a43-4c6b-9a4a-0a2f9b1d7e11";

#[derive(Default)]
struct MockState {
    generated: AtomicUsize,
    refreshed: AtomicUsize,
    spent_refresh_tokens: Mutex<HashSet<String>>,
}

type Shared = Arc<MockState>;

fn session_json(access_token: &str, expires_at: Option<i64>) -> Value {
    json!({
        "access_token": access_token,
        "refresh_token": format!("refresh-{}", access_token),
        "token_type": "bearer",
        "expires_in": 3600,
        "expires_at": expires_at,
        "user": {"id": USER_ID, "email": "mei@u.nus.edu"}
    })
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn unauthorized() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Missing Authorization header", "code": "UNAUTHORIZED"})),
    )
        .into_response()
}

async fn sign_in(Json(body): Json<Value>) -> impl IntoResponse {
    match body["password"].as_str() {
        Some("correct horse") => (StatusCode::OK, Json(session_json("token-1", None))),
        Some("stale") => (
            StatusCode::OK,
            Json(session_json("token-old", Some(1_000))),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid login credentials", "code": "UNAUTHORIZED"})),
        ),
    }
}

async fn refresh(State(state): State<Shared>, Json(body): Json<Value>) -> impl IntoResponse {
    state.refreshed.fetch_add(1, Ordering::SeqCst);
    let token = body["refresh_token"].as_str().unwrap_or_default().to_string();
    // Refresh tokens rotate: each one is accepted once.
    let fresh = state.spent_refresh_tokens.lock().unwrap().insert(token.clone());
    match token.as_str() {
        "refresh-token-old" if fresh => (StatusCode::OK, Json(session_json("token-new", None))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid Refresh Token", "code": "UNAUTHORIZED"})),
        ),
    }
}

async fn sign_out() -> impl IntoResponse {
    (StatusCode::BAD_GATEWAY, "upstream down")
}

async fn me(headers: HeaderMap) -> axum::response::Response {
    match bearer(&headers).as_deref() {
        Some("token-1") | Some("token-new") => Json(json!({
            "id": 7,
            "auth_user_id": USER_ID,
            "email": "mei@u.nus.edu",
            "username": "mei",
            "created_at": "2025-01-01T00:00:00Z"
        }))
        .into_response(),
        _ => unauthorized(),
    }
}

async fn list_cards(Path(deck_id): Path<i64>, headers: HeaderMap) -> axum::response::Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    if deck_id != 3 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": format!("Deck {} not found", deck_id), "code": "NOT_FOUND"})),
        )
            .into_response();
    }

    Json(json!([
        {
            "id": 1, "deck_id": 3, "sense_id": 11, "current_sentence": null,
            "created_at": "2025-01-01T00:00:00Z",
            "senses": {"word": "madrugada", "translation": "early morning"}
        },
        {
            "id": 2, "deck_id": 3, "sense_id": 12, "current_sentence": null,
            "created_at": "2025-01-01T00:00:01Z",
            "senses": {"word": "sobremesa", "translation": "after-lunch chat"}
        }
    ]))
    .into_response()
}

async fn generate(
    State(state): State<Shared>,
    Path((user_id, sense_id)): Path<(i64, i64)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> axum::response::Response {
    if bearer(&headers).is_none() {
        return unauthorized();
    }
    let n = state.generated.fetch_add(1, Ordering::SeqCst) + 1;
    (
        StatusCode::CREATED,
        Json(json!({
            "id": n,
            "user_id": user_id,
            "sense_id": sense_id,
            "language": body["language"],
            "sentence": format!("Sentence {} for sense {}.", n, sense_id),
            "created_at": "2025-01-01T00:00:00Z"
        })),
    )
        .into_response()
}

async fn spawn_mock() -> (String, Shared) {
    let state: Shared = Arc::new(MockState::default());
    let app = Router::new()
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/refresh", post(refresh))
        .route("/auth/sign-out", post(sign_out))
        .route("/me", get(me))
        .route("/decks/:deck_id/cards", get(list_cards))
        .route(
            "/users/:user_id/senses/:sense_id/sentence_history",
            post(generate),
        )
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

#[tokio::test]
async fn test_sign_in_stores_session_and_authorizes_requests() {
    let (base_url, _) = spawn_mock().await;
    let client = ApiClient::new(base_url).unwrap();
    let mut events = client.session().events();

    let session = client.sign_in("mei@u.nus.edu", "correct horse").await.unwrap();
    assert_eq!(session.access_token, "token-1");
    assert!(client.session().is_signed_in());
    assert!(matches!(events.recv().await.unwrap(), AuthEvent::SignedIn(_)));

    let profile = client.me().await.unwrap();
    assert_eq!(profile.id, 7);
    assert_eq!(profile.username, "mei");
}

#[tokio::test]
async fn test_error_detail_is_surfaced() {
    let (base_url, _) = spawn_mock().await;
    let client = ApiClient::new(base_url).unwrap();

    let err = client.sign_in("mei@u.nus.edu", "wrong").await.unwrap_err();
    match err {
        ClientError::Api { status, detail } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(detail, "Invalid login credentials");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!client.session().is_signed_in());
}

#[tokio::test]
async fn test_requests_without_session_fail_locally() {
    let (base_url, state) = spawn_mock().await;
    let client = ApiClient::new(base_url).unwrap();

    assert!(matches!(client.me().await, Err(ClientError::NotSignedIn)));
    assert!(matches!(
        client.generate_sentence(7, 11, "es").await,
        Err(ClientError::NotSignedIn)
    ));
    assert_eq!(state.generated.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_invalid_card_is_rejected_before_sending() {
    let (base_url, _) = spawn_mock().await;
    let client = ApiClient::new(base_url).unwrap();
    client.sign_in("mei@u.nus.edu", "correct horse").await.unwrap();

    let request = CreateCardRequest {
        word: "  ".to_string(),
        translation: "nothing".to_string(),
    };
    match client.create_card(3, &request).await {
        Err(ClientError::Invalid(message)) => assert_eq!(message, "Word cannot be empty"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_expired_session_is_refreshed_before_request() {
    let (base_url, state) = spawn_mock().await;
    let client = ApiClient::new(base_url).unwrap();

    client.sign_in("mei@u.nus.edu", "stale").await.unwrap();
    let mut events = client.session().events();

    let profile = client.me().await.unwrap();
    assert_eq!(profile.id, 7);
    assert_eq!(state.refreshed.load(Ordering::SeqCst), 1);
    assert_eq!(
        client.session().current().unwrap().access_token,
        "token-new"
    );
    assert!(matches!(
        events.recv().await.unwrap(),
        AuthEvent::TokenRefreshed(_)
    ));
}

#[tokio::test]
async fn test_concurrent_requests_share_one_refresh() {
    let (base_url, state) = spawn_mock().await;
    let client = ApiClient::new(base_url).unwrap();
    client.sign_in("mei@u.nus.edu", "stale").await.unwrap();

    let (first, second, third) = tokio::join!(client.me(), client.me(), client.me());
    assert_eq!(first.unwrap().id, 7);
    assert_eq!(second.unwrap().id, 7);
    assert_eq!(third.unwrap().id, 7);

    assert_eq!(state.refreshed.load(Ordering::SeqCst), 1);
    assert!(client.session().is_signed_in());
    assert_eq!(
        client.session().current().unwrap().access_token,
        "token-new"
    );
}

#[tokio::test]
async fn test_rejected_refresh_token_signs_out() {
    let (base_url, _) = spawn_mock().await;
    let client = ApiClient::new(base_url).unwrap();
    client.sign_in("mei@u.nus.edu", "stale").await.unwrap();

    let session = client.refresh().await.unwrap();
    assert_eq!(session.access_token, "token-new");

    // The mock never accepts "refresh-token-new".
    let err = client.refresh().await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    assert!(!client.session().is_signed_in());
}

#[tokio::test]
async fn test_sign_out_clears_session_even_when_server_fails() {
    let (base_url, _) = spawn_mock().await;
    let client = ApiClient::new(base_url).unwrap();
    client.sign_in("mei@u.nus.edu", "correct horse").await.unwrap();
    let mut watcher = client.session().subscribe();

    let err = client.sign_out().await.unwrap_err();
    // Non-JSON error bodies fall back to the status reason.
    assert_eq!(err.to_string(), "Bad Gateway");
    assert!(!client.session().is_signed_in());

    watcher.changed().await.unwrap();
    assert!(watcher.borrow().is_none());

    // Signing out twice is a no-op.
    tokio_test::assert_ok!(client.sign_out().await);
}

#[tokio::test]
async fn test_unknown_deck_reports_not_found() {
    let (base_url, _) = spawn_mock().await;
    let client = ApiClient::new(base_url).unwrap();
    client.sign_in("mei@u.nus.edu", "correct horse").await.unwrap();

    let err = client.list_cards(99).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(err.to_string(), "Deck 99 not found");
}

#[tokio::test]
async fn test_study_session_generates_sentence_per_card_once() {
    let (base_url, state) = spawn_mock().await;
    let client = ApiClient::new(base_url).unwrap();
    client.sign_in("mei@u.nus.edu", "correct horse").await.unwrap();

    let mut study = StudySession::load(&client, 3, 7)
        .await
        .unwrap()
        .with_language("es");
    assert_eq!(study.len(), 2);

    assert!(study.ensure_sentence(&client).await.unwrap());
    assert_eq!(
        study.current_card().unwrap().current_sentence.as_deref(),
        Some("Sentence 1 for sense 11.")
    );

    // Already has a sentence: no second request.
    assert!(!study.ensure_sentence(&client).await.unwrap());
    assert_eq!(state.generated.load(Ordering::SeqCst), 1);

    assert!(study.next());
    assert!(study.ensure_sentence(&client).await.unwrap());
    assert_eq!(
        study.current_card().unwrap().current_sentence.as_deref(),
        Some("Sentence 2 for sense 12.")
    );

    // Going back reuses the stored sentence.
    assert!(study.previous());
    assert!(!study.ensure_sentence(&client).await.unwrap());
    assert_eq!(state.generated.load(Ordering::SeqCst), 2);
}
