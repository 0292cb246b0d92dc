//! Common test utilities for integration tests.
//!
//! Sessions live in memory, so every test gets its own router and store.

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;
use serde_json::Value;

use bilingual_flashcards_server::config::Config;
use bilingual_flashcards_server::{router, AppState};

/// Test context holding a router over a fresh session store.
pub struct TestContext {
    app: Router,
}

impl TestContext {
    /// Context with default configuration (shuffle off).
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            app: router(AppState::new(config)),
        }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).unwrap()
    }
}

/// Create a session from `text` and return its snapshot.
pub async fn create_session(server: &TestServer, text: &str) -> Value {
    let response = server
        .post("/api/sessions")
        .json(&fixtures::start_request(text, false))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

/// Session id from a snapshot.
pub fn session_id(snapshot: &Value) -> String {
    snapshot["session_id"].as_str().unwrap().to_string()
}

/// POST a command to a session and return the response.
pub async fn command(
    server: &TestServer,
    id: &str,
    action: &str,
    body: Option<Value>,
) -> axum_test::TestResponse {
    let request = server.post(&format!("/api/sessions/{}/{}", id, action));
    match body {
        Some(body) => request.json(&body).await,
        None => request.await,
    }
}
