//! Route definitions for the CopyDeck HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState`
//! and passes it to every handler via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(campaign_routes())
        .merge(analysis_routes())
        .merge(drive_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::new(timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Campaign build, listing, structure and touchpoint content
fn campaign_routes() -> Router<AppState> {
    Router::new()
        .route("/create-campaign", post(handlers::campaign::create_campaign))
        .route("/campaigns", get(handlers::campaign::list_campaigns))
        .route("/campaigns/{challenge_name}", get(handlers::campaign::get_campaign))
        .route(
            "/campaigns/{challenge_name}/{channel_name}/touchpoints",
            get(handlers::campaign::get_touchpoint_content),
        )
        .route("/touchpoints/catalog", get(handlers::catalog::touchpoint_catalog))
}

fn analysis_routes() -> Router<AppState> {
    Router::new().route("/analyze-file", post(handlers::analysis::analyze_file))
}

/// Path-addressed file and folder operations
fn drive_routes() -> Router<AppState> {
    Router::new()
        .route("/drive/files", get(handlers::drive::list_root_files))
        .route("/drive/contents", get(handlers::drive::list_contents))
        .route("/drive/folders", get(handlers::drive::list_folders))
        .route("/drive/folder", post(handlers::drive::create_folder))
        .route("/drive/file", post(handlers::drive::create_file))
        .route("/drive/resolve", post(handlers::drive::resolve_path))
        .route("/drive/ensure", post(handlers::drive::ensure_path))
        .route("/drive/delete", post(handlers::drive::delete_file))
}
