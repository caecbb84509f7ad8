use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wording_core::clock::SystemClock;
use wording_core::reporting::{Reporting, TracingSink};
use wording_core::service::{GameService, WordingService};
use wording_core::store::Store;
use wording_core::tokens::{
    HumanReadableTokenGenerator, TokenGenerator, UuidTokenGenerator, WithFallback,
};
use wording_db::{MemoryStore, PgStore};

use wording_api::config::ServerConfig;
use wording_api::randword::RandomWordClient;
use wording_api::reporting::WebhookSink;
use wording_api::router::build_app_router;
use wording_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "wording_api=debug,wording_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Store ---
    let store = build_store(&config).await;

    // --- Token generators ---
    let game_tokens: Arc<dyn TokenGenerator> = match &config.random_word_api_url {
        Some(url) => {
            let client = RandomWordClient::new(url.as_str())
                .expect("Failed to build random word HTTP client");
            tracing::info!(%url, "Game tokens from random word service");
            Arc::new(WithFallback::new(client, HumanReadableTokenGenerator::new()))
        }
        None => Arc::new(HumanReadableTokenGenerator::new()),
    };

    // --- Service ---
    let wording = WordingService::new(
        Arc::clone(&store),
        Arc::new(UuidTokenGenerator),
        game_tokens,
        Arc::new(SystemClock),
    );
    let service: Arc<dyn GameService> = match &config.error_report_url {
        Some(url) => {
            let sink = WebhookSink::new(url.as_str()).expect("Failed to build error report client");
            tracing::info!(%url, "Reporting errors to webhook");
            Arc::new(Reporting::new(wording, sink))
        }
        None => Arc::new(Reporting::new(wording, TracingSink)),
    };

    // --- App state ---
    let state = AppState { service, store };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Connect to PostgreSQL when `DATABASE_URL` is set, otherwise keep
/// everything in memory.
async fn build_store(config: &ServerConfig) -> Arc<dyn Store> {
    let Some(database_url) = &config.database_url else {
        tracing::warn!("DATABASE_URL not set, using in-memory store");
        return Arc::new(MemoryStore::new());
    };

    let pool = wording_db::create_pool(database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    wording_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    wording_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    Arc::new(PgStore::new(pool))
}

/// Wait for SIGINT or SIGTERM to initiate graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
