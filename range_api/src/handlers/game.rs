use axum::extract::State;
use axum::Json;
use tracing::instrument;
use tr_axum::lenient::LenientJson;
use types::{GameState, OkResponse, PauseResponse, ScoreState, StateSnapshot};

use crate::config_service::ConfigPatch;
use crate::control::PauseRequest;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn get_config_handler(State(state): State<AppState>) -> Json<GameState> {
    Json(state.game.get_config().await)
}

#[instrument(skip(state))]
pub async fn put_config_handler(
    State(state): State<AppState>,
    LenientJson(patch): LenientJson<ConfigPatch>,
) -> Json<GameState> {
    Json(state.game.apply_config(&patch).await)
}

#[instrument(skip(state))]
pub async fn pause_handler(
    State(state): State<AppState>,
    LenientJson(request): LenientJson<PauseRequest>,
) -> Json<PauseResponse> {
    Json(state.game.set_paused(&request).await)
}

#[instrument(skip(state))]
pub async fn reset_handler(State(state): State<AppState>) -> Json<OkResponse> {
    Json(state.game.reset().await)
}

#[instrument(skip(state))]
pub async fn get_score_handler(State(state): State<AppState>) -> Json<ScoreState> {
    Json(state.game.score().await)
}

#[instrument(skip(state))]
pub async fn get_state_handler(
    State(state): State<AppState>,
) -> Json<StateSnapshot> {
    Json(state.game.snapshot().await)
}
