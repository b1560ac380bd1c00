//! Route configuration.

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/item", get(handlers::get_item))
        .route("/api/preview", get(handlers::get_preview))
        .route("/api/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
