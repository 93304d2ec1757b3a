//! HTTP routes.

use std::sync::Arc;

use axum::{Router, http::Method, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod app_state;
pub mod content_search;
pub mod manifest;

pub use app_state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    // IIIF viewers fetch manifests and search results cross-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/{volume_id}/search", get(content_search::content_search))
        .route("/{volume_id}/manifest", get(manifest::manifest))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
