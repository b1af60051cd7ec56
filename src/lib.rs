pub mod config;
pub mod course_tree;
pub mod db;
pub mod error;
pub mod models;
pub mod quiz;
pub mod routes;
pub mod slots;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};

pub use routes::AppState;

/// Full HTTP app: health check, API routes and the shared layers.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(routes::router(state))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}
