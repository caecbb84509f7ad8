#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;
use wording_core::clock::SystemClock;
use wording_core::reporting::{Reporting, TracingSink};
use wording_core::service::WordingService;
use wording_core::store::{Store, StoreError};
use wording_core::tokens::UuidTokenGenerator;
use wording_core::types::{Game, Plays, Stats, StatsIncrement};
use wording_db::MemoryStore;

use wording_api::config::ServerConfig;
use wording_api::handlers::games::PLAYER_TOKEN_HEADER;
use wording_api::router::build_app_router;
use wording_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        random_word_api_url: None,
        error_report_url: None,
    }
}

/// Build the full application router over `store`, with the same
/// middleware stack production uses.
pub fn build_app_with_store(store: Arc<dyn Store>) -> Router {
    let config = test_config();
    let service = WordingService::new(
        Arc::clone(&store),
        Arc::new(UuidTokenGenerator),
        Arc::new(UuidTokenGenerator),
        Arc::new(SystemClock),
    );
    let state = AppState {
        service: Arc::new(Reporting::new(service, TracingSink)),
        store,
    };
    build_app_router(state, &config)
}

/// Full application over a fresh in-memory store.
pub fn build_test_app() -> Router {
    build_app_with_store(Arc::new(MemoryStore::new()))
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Issue a GET request with no body.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

/// Issue a request, optionally with a JSON body and a player token.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    player_token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = player_token {
        builder = builder.header(PLAYER_TOKEN_HEADER, token);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Create a game through the API and return its JSON representation.
pub async fn create_game(app: &Router, answer: &str, guess_limit: i32) -> serde_json::Value {
    let response = send(
        app.clone(),
        Method::POST,
        "/api/v1/games",
        Some(serde_json::json!({ "answer": answer, "guess_limit": guess_limit })),
        None,
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Submit a guess as `player`.
pub async fn guess(app: &Router, token: &str, player: &str, guess: &str) -> Response<Body> {
    send(
        app.clone(),
        Method::POST,
        &format!("/api/v1/games/{token}/guesses"),
        Some(serde_json::json!({ "guess": guess })),
        Some(player),
    )
    .await
}

// ---------------------------------------------------------------------------
// Broken store
// ---------------------------------------------------------------------------

/// A store whose every operation fails with a backend error.
pub struct BrokenStore;

fn broken() -> StoreError {
    StoreError::backend("connection refused")
}

#[async_trait]
impl Store for BrokenStore {
    async fn create_game(&self, _game: &Game) -> Result<Game, StoreError> {
        Err(broken())
    }

    async fn game(&self, _admin_token: &str) -> Result<Game, StoreError> {
        Err(broken())
    }

    async fn game_by_token(&self, _token: &str) -> Result<Game, StoreError> {
        Err(broken())
    }

    async fn plays(&self, _game_token: &str, _player_token: &str) -> Result<Plays, StoreError> {
        Err(broken())
    }

    async fn put_plays(
        &self,
        _game_token: &str,
        _player_token: &str,
        _plays: &Plays,
    ) -> Result<(), StoreError> {
        Err(broken())
    }

    async fn increment_stats(&self, _increment: &StatsIncrement) -> Result<(), StoreError> {
        Err(broken())
    }

    async fn stats(&self) -> Result<Stats, StoreError> {
        Err(broken())
    }

    async fn game_stats(&self, _admin_token: &str) -> Result<Stats, StoreError> {
        Err(broken())
    }

    async fn delete_game(&self, _admin_token: &str) -> Result<(), StoreError> {
        Err(broken())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(broken())
    }
}
