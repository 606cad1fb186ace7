//! Roster endpoint: per-player aggregates with sort controls.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{SortKey, SortOrder};
use crate::models::Player;

#[derive(Debug, Deserialize)]
pub struct RosterParams {
    pub sort: Option<SortKey>,
    pub order: Option<SortOrder>,
}

#[derive(Debug, Serialize)]
pub struct RosterResponse {
    pub players: Vec<Player>,
}

pub async fn roster(
    State(state): State<AppState>,
    Query(params): Query<RosterParams>,
) -> Result<Json<RosterResponse>, ApiError> {
    // Ranking screen default: biggest winner on top.
    let key = params.sort.unwrap_or(SortKey::Balance);
    let order = params.order.unwrap_or(SortOrder::Desc);

    let tracker = state.tracker.read().await;
    Ok(Json(RosterResponse {
        players: tracker.roster(key, order),
    }))
}
