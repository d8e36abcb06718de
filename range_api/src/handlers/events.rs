use axum::extract::State;
use axum::Json;
use tracing::instrument;
use tr_axum::lenient::LenientJson;
use types::{EventReceipt, GameEvent, OkResponse};

use crate::ingest::EventReport;
use crate::state::AppState;

#[instrument(skip(state))]
pub async fn report_event_handler(
    State(state): State<AppState>,
    LenientJson(report): LenientJson<EventReport>,
) -> Json<EventReceipt> {
    Json(state.game.report_event(&report).await)
}

/// Newest first.
#[instrument(skip(state))]
pub async fn list_events_handler(
    State(state): State<AppState>,
) -> Json<Vec<GameEvent>> {
    Json(state.game.events().await)
}

#[instrument(skip(state))]
pub async fn clear_events_handler(State(state): State<AppState>) -> Json<OkResponse> {
    state.game.clear_events().await;

    Json(OkResponse::ok())
}
