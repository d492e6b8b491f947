use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::pms::{
    EpisodeListing, MetadataResponse, RecentlyAdded, ServerIdentity, ServerInfo, SessionSummary,
};
use crate::server::AppState;

// A `None` from the client means the media server could not be reached or
// its reply could not be read.
fn found<T>(value: Option<T>) -> Result<Json<T>, StatusCode> {
    value.map(Json).ok_or(StatusCode::BAD_GATEWAY)
}

pub async fn get_activity(State(state): State<AppState>) -> Result<Json<SessionSummary>, StatusCode> {
    found(state.pms.get_current_activity().await)
}

pub async fn get_metadata(
    State(state): State<AppState>,
    Path(rating_key): Path<String>,
) -> Result<Json<MetadataResponse>, StatusCode> {
    found(state.pms.get_metadata_details(&rating_key).await)
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    10
}

pub async fn get_recently_added(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<RecentlyAdded>, StatusCode> {
    found(state.pms.get_recently_added_details(query.count).await)
}

pub async fn get_episodes(
    State(state): State<AppState>,
    Path(rating_key): Path<String>,
) -> Result<Json<EpisodeListing>, StatusCode> {
    found(state.pms.get_season_children(&rating_key).await)
}

pub async fn get_servers(State(state): State<AppState>) -> Result<Json<Vec<ServerInfo>>, StatusCode> {
    found(state.pms.get_servers_info().await)
}

pub async fn get_identity(State(state): State<AppState>) -> Result<Json<ServerIdentity>, StatusCode> {
    found(state.pms.get_server_identity().await)
}
