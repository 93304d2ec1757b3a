//! Content search and manifest server entry point.

use std::sync::Arc;

use contentsearch::config::ServiceConfig;
use contentsearch::server_extra::{AppState, build_router};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("contentsearch=info,tower_http=info")),
        )
        .init();

    let config = ServiceConfig::from_env()?;
    info!("Search engine: {}", config.solr_url);
    info!("Image server: {}", config.image_server_url);
    info!("hOCR documents: {}", config.hocr_root.display());

    let state = Arc::new(AppState::new(&config)?);
    let app = build_router(state);

    info!("Listening on http://{} (public base {})", config.bind_addr, config.public_base_url);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
