pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::sessions::SessionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            sessions: Arc::new(SessionStore::new(config.idle_timeout())),
            config: Arc::new(config),
        }
    }
}

/// Every route of the study API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        // Input screen
        .route("/api/cards/sample", get(routes::cards::sample))
        .route("/api/cards/parse", post(routes::cards::preview))
        // Study sessions
        .route("/api/sessions", post(routes::sessions::create))
        .route(
            "/api/sessions/:id",
            get(routes::sessions::get).delete(routes::sessions::delete),
        )
        .route("/api/sessions/:id/start", post(routes::sessions::start))
        .route("/api/sessions/:id/classify", post(routes::sessions::classify))
        .route("/api/sessions/:id/undo", post(routes::sessions::undo))
        .route("/api/sessions/:id/shuffle", post(routes::sessions::shuffle))
        .route("/api/sessions/:id/end-round", post(routes::sessions::end_round))
        .route("/api/sessions/:id/next-round", post(routes::sessions::next_round))
        .route("/api/sessions/:id/end-early", post(routes::sessions::end_early))
        .route("/api/sessions/:id/restart", post(routes::sessions::restart))
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = config.addr();
    tracing::info!(
        shuffle_by_default = config.shuffle_by_default,
        idle_minutes = config.session_idle_minutes,
        "Loaded configuration"
    );

    let app = router(AppState::new(config))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
