//! # taskhub server
//!
//! HTTP/JSON API for tracking users and their tasks, backed by MongoDB.
//!
//! ## Usage
//!
//! ```bash
//! MONGODB_URL=mongodb://localhost:27017 cargo run
//! ```

use taskhub::app::{build_router, AppState};
use taskhub::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskhub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("taskhub v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env()?;
    let db = taskhub::db::connect(&config.database).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(db, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received, exiting...");
}
