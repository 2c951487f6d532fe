//! HTTP boundary: `POST /parse` and `GET /health`

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::{api_routes, app};
pub use state::AppState;

use std::sync::Arc;

use tracing::info;

use crate::core::config::ParserConfig;
use crate::query_processor::QueryParser;

pub async fn run_server(config: ParserConfig) -> anyhow::Result<()> {
    info!("🚀 Initializing parse service...");

    let parser = Arc::new(QueryParser::initialize(&config).await);
    let router = app(AppState::new(parser));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!("✅ Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
