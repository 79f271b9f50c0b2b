/// Application state and router builder
///
/// This module defines the shared application state and provides a function
/// to build the Axum router with all routes and middleware.

use crate::config::Config;
use axum::{
    routing::{get, post},
    Router,
};
use mongodb::Database;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// The database handle is pooled internally, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Document store handle
    pub db: Database,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: Database, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health              # Health check
/// ├── /user                # POST: create user
/// ├── /user/:user_id       # GET / PUT / DELETE
/// └── /task/:id            # GET / PUT / DELETE by task id,
///                          # POST: create task under the user with this id
/// ```
///
/// # Middleware Stack
///
/// 1. Request logging (tower-http TraceLayer)
/// 2. CORS (permissive; there is no auth layer in front of this API)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let user_routes = Router::new()
        .route("/user", post(routes::users::create_user))
        .route(
            "/user/:user_id",
            get(routes::users::get_user)
                .put(routes::users::update_user)
                .delete(routes::users::delete_user),
        );

    // One pattern serves both id spaces: POST interprets the parameter as
    // the owning user's id, the other verbs as the task's id.
    let task_routes = Router::new().route(
        "/task/:id",
        post(routes::tasks::create_task)
            .get(routes::tasks::get_task)
            .put(routes::tasks::update_task)
            .delete(routes::tasks::delete_task),
    );

    Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(user_routes)
        .merge(task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
