/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and cleanup (one throwaway database per test)
/// - Router construction
/// - Request/response helpers
///
/// Store-backed tests read `MONGODB_URL` from the environment (a `.env`
/// file works) and are ignored by default so a plain `cargo test` run does
/// not need a running MongoDB.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use taskhub::app::{build_router, AppState};
use taskhub::config::{ApiConfig, Config, DatabaseConfig};
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: mongodb::Database,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context backed by a fresh, uniquely named database
    pub async fn new() -> anyhow::Result<Self> {
        let mut config = Config::from_env()?;
        config.database.database = format!("taskhub_test_{}", Uuid::new_v4().simple());

        let db = taskhub::db::connect(&config.database).await?;

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Cleans up test data by dropping the per-test database
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        self.db.drop().await?;
        Ok(())
    }
}

/// Builds a router whose store handle is never exercised
///
/// The driver connects lazily, so handlers that fail before any store call
/// (body validation, framework rejections) can be tested without a running
/// MongoDB.
pub async fn offline_router() -> axum::Router {
    let config = Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "mongodb://127.0.0.1:27017".to_string(),
            database: "taskhub_offline".to_string(),
        },
    };

    let client = mongodb::Client::with_uri_str(&config.database.url)
        .await
        .expect("parsing a static connection string");
    let db = client.database(&config.database.database);

    build_router(AppState::new(db, config))
}

/// Sends one request through the router and returns status plus JSON body
///
/// Empty response bodies (204s) come back as `Value::Null`.
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().call(request).await.unwrap();
    let status = response.status();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        // Framework-level rejections (serde extraction, path parse) return
        // plain-text bodies; fall back to the raw text as a JSON string so the
        // helper never panics on a non-JSON body.
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, json)
}

/// Helper to create a user and return its JSON representation
pub async fn create_test_user(ctx: &TestContext, username: &str) -> Value {
    let (status, user) = send(
        &ctx.app,
        "POST",
        "/user",
        Some(serde_json::json!({
            "username": username,
            "full_name": "Test User",
            "email": format!("{username}@example.com"),
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    user
}

/// Helper to create a task under a user and return its JSON representation
pub async fn create_test_task(ctx: &TestContext, user_id: &str, title: &str) -> Value {
    let (status, task) = send(
        &ctx.app,
        "POST",
        &format!("/task/{user_id}"),
        Some(serde_json::json!({
            "task_data": { "title": title, "message": "Good Morning" },
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    task
}
