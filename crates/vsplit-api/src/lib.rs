//! Axum HTTP API server.
//!
//! Thin transport over the segmentation pipeline:
//! - `POST /segment` behind a shared-secret `x-api-key` gate
//! - `GET /health` liveness endpoint
//! - Configuration from environment variables

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
