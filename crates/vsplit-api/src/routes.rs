//! API routes.

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::{health, segment_video};
use crate::middleware::{cors_layer, request_id, request_logging, require_api_key};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    // The shared-secret gate wraps only the segmentation route; health
    // stays unconditional.
    let segment_routes = Router::new()
        .route("/segment", post(segment_video))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_api_key,
        ));

    let health_routes = Router::new().route("/health", get(health));

    Router::new()
        .merge(segment_routes)
        .merge(health_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer())
        .with_state(state)
}
