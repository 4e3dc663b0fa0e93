//! HTTP router.
//!
//! `/` serves the upload page; JSON and download endpoints are nested
//! under `/api/`. Every response is marked `Cache-Control: no-store`
//! since bodies carry patient data.

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the application router.
pub fn api_router(ctx: ApiContext) -> Router {
    let body_limit = ctx.config.max_upload_bytes;

    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/generate-summary", post(endpoints::summary::generate))
        .route(
            "/generate-summary/download",
            post(endpoints::summary::download),
        );

    Router::new()
        .route("/", get(endpoints::page::index))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .with_state(ctx)
}
