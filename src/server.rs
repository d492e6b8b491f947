use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::pms::PmsConnect;

#[derive(Clone)]
pub struct AppState {
    pub pms: Arc<PmsConnect>,
}

impl AppState {
    pub fn new(pms: Arc<PmsConnect>) -> Self {
        Self { pms }
    }
}

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/activity", get(crate::api::get_activity))
        .route("/api/metadata/:rating_key", get(crate::api::get_metadata))
        .route("/api/recently_added", get(crate::api::get_recently_added))
        .route("/api/episodes/:rating_key", get(crate::api::get_episodes))
        .route("/api/servers", get(crate::api::get_servers))
        .route("/api/identity", get(crate::api::get_identity));

    Router::new()
        .route("/robots.txt", get(robots_txt_handler))
        .merge(api_routes)
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}

async fn fallback_handler() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}
