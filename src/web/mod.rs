//! Web front end using Axum
//!
//! Serves the screening form as server-rendered HTML plus a small JSON API:
//! - `GET /`, `POST /` - the form and its submission
//! - `POST /api/v1/predict` - JSON in, enveloped prediction out
//! - `GET /health` - liveness
//! - `/assets/*` - stylesheet and busy-state script via `rust-embed`

pub mod envelope;
pub mod handlers;
pub mod pages;
mod routes;

pub use handlers::WebState;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use rust_embed::Embed;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::config::defaults::MAX_REQUEST_BODY_BYTES;

/// Stylesheet and script compiled into the binary from `assets/`.
#[derive(Embed)]
#[folder = "assets/"]
struct FormAssets;

/// Serve an embedded asset by path.
async fn serve_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches("/assets/");

    match FormAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

/// Create the complete application router.
pub fn create_app(state: WebState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes(state.clone()))
        .merge(routes::page_routes(state))
        .route("/assets/*path", axum::routing::get(serve_asset))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
}
