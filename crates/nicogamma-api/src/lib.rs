pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::comment,
    middleware::logging,
    routes::{health, videos},
    state::AppState,
};

pub fn build_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Video pages and media
        .route("/", get(videos::index))
        .route("/watch", get(videos::watch))
        .route("/flvplayer.swf", get(videos::player))
        .route("/getflv", get(videos::get_flv))
        .route("/smile", get(videos::smile))
        // Comment server
        .route("/api/comment", post(comment::post_comment))
        .layer(axum_middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
