//! Route modules for the PDF analysis server

pub mod analyze;
pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_upload_bytes = state.config().server.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_check))
        .merge(analyze::router().layer(DefaultBodyLimit::max(max_upload_bytes)))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
