//! Game endpoints: session history and add/edit/delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::{Game, GameId, GameType, PlayerResult};

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// "all" (default), "cash" or "tournament".
    pub filter: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GamesResponse {
    pub games: Vec<Game>,
}

/// Request body for creating or editing a game.
#[derive(Debug, Deserialize)]
pub struct GameRequest {
    pub game_type: GameType,
    pub players: Vec<PlayerResult>,
}

fn parse_filter(filter: Option<&str>) -> Result<Option<GameType>, ApiError> {
    match filter {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("all") => Ok(None),
        Some(s) => GameType::parse(s)
            .map(Some)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown filter {:?}", s))),
    }
}

pub async fn list_games(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<GamesResponse>, ApiError> {
    let filter = parse_filter(params.filter.as_deref())?;
    let tracker = state.tracker.read().await;

    Ok(Json(GamesResponse {
        games: tracker.list_games(filter),
    }))
}

pub async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Game>, ApiError> {
    let tracker = state.tracker.read().await;
    tracker
        .game(&GameId::from(id.as_str()))
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("game {}", id)))
}

pub async fn create_game(
    State(state): State<AppState>,
    Json(body): Json<GameRequest>,
) -> Result<(StatusCode, Json<Game>), ApiError> {
    let game = Game::new(body.game_type, body.players);

    let mut tracker = state.tracker.write().await;
    let id = tracker.add_or_update_game(game)?;
    let stored = tracker
        .game(&id)
        .cloned()
        .ok_or_else(|| ApiError::Internal("stored game vanished".to_string()))?;

    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn update_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<GameRequest>,
) -> Result<Json<Game>, ApiError> {
    let id = GameId::from(id.as_str());
    let candidate = Game::new(body.game_type, body.players).with_id(id.clone());

    let mut tracker = state.tracker.write().await;
    if tracker.game(&id).is_none() {
        return Err(ApiError::NotFound(format!("game {}", id)));
    }
    tracker.add_or_update_game(candidate)?;
    let stored = tracker
        .game(&id)
        .cloned()
        .ok_or_else(|| ApiError::Internal("stored game vanished".to_string()))?;

    Ok(Json(stored))
}

pub async fn delete_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let mut tracker = state.tracker.write().await;
    if tracker.delete_game(&GameId::from(id.as_str())) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("game {}", id)))
    }
}
