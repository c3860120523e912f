//! Route definitions
//!
//! - `/` - screening form (GET renders, POST submits)
//! - `/api/v1/predict` - JSON prediction endpoint
//! - `/health` - liveness check

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{self, WebState};

/// Server-rendered form routes
pub fn page_routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(handlers::get_form).post(handlers::submit_form))
        .route("/health", get(handlers::health))
        .with_state(state)
}

/// JSON API routes, nested under `/api/v1`
pub fn api_routes(state: WebState) -> Router {
    Router::new()
        .route("/predict", post(handlers::api_predict))
        .with_state(state)
}
