//! HTTP API route definitions.

use axum::{http::Method, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{badge, health, metrics, status, AppState};

/// Create the API router.
///
/// Static paths take priority over the `/:id` capture, so a service
/// cannot be named `health`, `metrics` or `endpoint` on the plain route.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        // Operational endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        // shields.io endpoint badge
        .route("/endpoint", get(badge))
        .route("/endpoint/", get(badge))
        .route("/endpoint/:id", get(badge))
        // Plain status
        .route("/", get(status))
        .route("/:id", get(status))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}
