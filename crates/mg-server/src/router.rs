//! Axum router construction.
//!
//! Builds the full application router with all routes and middleware layers.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::context::AppContext;
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = usize::try_from(ctx.config.uploads.body_limit_bytes).unwrap_or(usize::MAX);

    Router::new()
        .route("/", get(routes::health::health_check))
        .route("/health", get(routes::health::health_check))
        .route("/upload", post(routes::upload::upload_image))
        .route("/images", get(routes::images::list_images))
        .route(
            "/images/{id}",
            get(routes::images::get_image).delete(routes::images::delete_image),
        )
        .route(
            "/images/{id}/thumbnail",
            get(routes::images::get_thumbnail),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}
