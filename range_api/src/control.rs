use serde::Deserialize;
use serde_json::Value;
use types::{OkResponse, PauseResponse, ScoreState};

use crate::coerce;
use crate::game::Game;

/// Body of `POST /pause`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PauseRequest {
    pub paused: Option<Value>,
    pub countdown: Option<Value>,
    pub sec: Option<Value>,
}

impl PauseRequest {
    pub fn pause() -> Self {
        Self {
            paused: Some(Value::Bool(true)),
            ..Self::default()
        }
    }

    pub fn resume() -> Self {
        Self {
            paused: Some(Value::Bool(false)),
            ..Self::default()
        }
    }

    pub fn resume_after(sec: Value) -> Self {
        Self {
            paused: Some(Value::Bool(false)),
            countdown: Some(Value::Bool(true)),
            sec: Some(sec),
        }
    }
}

/// Whole seconds for a countdown resume.
///
/// Anything that is not a positive number falls back to `default`; fractions
/// round up and the result never exceeds `max`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn countdown_secs(sec: Option<&Value>, default: u64, max: u64) -> u64 {
    coerce::loose_number(sec)
        .filter(|sec| *sec > 0.0)
        .map_or(default, |sec| (sec.ceil() as u64).min(max))
}

impl Game {
    pub async fn set_paused(&self, request: &PauseRequest) -> PauseResponse {
        let mut core = self.lock().await;

        let Some(paused) = request.paused.as_ref().and_then(Value::as_bool) else {
            tracing::debug!(paused = ?request.paused, "pause request without a boolean");
            return PauseResponse {
                paused: core.state.paused,
            };
        };

        if !paused && coerce::truthy(request.countdown.as_ref()) {
            let settings = self.settings();
            let secs = countdown_secs(
                request.sec.as_ref(),
                settings.countdown_secs,
                settings.max_countdown_secs,
            );
            self.begin_countdown(&mut core, secs);
        } else {
            let cancelled = core.countdown.cancel();
            core.state.paused = paused;
            self.publish_config(&core);
            tracing::info!(paused, cancelled, "pause set");
        }

        PauseResponse {
            paused: core.state.paused,
        }
    }

    /// Zeroes the score and restarts play behind a countdown. The event
    /// history is kept.
    pub async fn reset(&self) -> OkResponse {
        let mut core = self.lock().await;

        core.score = ScoreState::default();
        self.publish_score(&core);
        tracing::info!("score reset");

        self.begin_countdown(&mut core, self.settings().countdown_secs);

        OkResponse::ok()
    }
}
