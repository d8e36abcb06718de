//! Coordinator for a shooting-range game: holds the shared game state,
//! scores events reported by the sensor controller and pushes every change
//! to the connected viewers.

use axum::routing::{get, post};
use axum::Router;

pub mod bus;
pub mod coerce;
pub mod config;
pub mod config_service;
pub mod control;
pub mod countdown;
pub mod error;
pub mod game;
pub mod handlers;
pub mod history;
pub mod ingest;
pub mod state;

use handlers::{events, game as game_handlers, ws};
use state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/config",
            get(game_handlers::get_config_handler)
                .put(game_handlers::put_config_handler),
        )
        .route("/pause", post(game_handlers::pause_handler))
        .route("/reset", post(game_handlers::reset_handler))
        .route("/score", get(game_handlers::get_score_handler))
        .route("/state", get(game_handlers::get_state_handler))
        .route("/event", post(events::report_event_handler))
        .route("/events", get(events::list_events_handler))
        .route("/clear-events", post(events::clear_events_handler))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
}
