//! HTTP API surface.

pub mod error;
pub mod routes;
pub mod summarize;
pub mod tools;
pub mod types;

use std::sync::Arc;

pub use routes::{build_router, AppState};

use crate::config::Config;

/// Bind the configured address and serve the API until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::new(config)?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
