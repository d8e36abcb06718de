use chrono::Utc;
use serde::Deserialize;
use serde_json::{Number, Value};
use types::{EventKind, EventReceipt, GameEvent, Notification};

use crate::coerce;
use crate::game::Game;

/// Body of `POST /event` as sent by the sensor controller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventReport {
    #[serde(rename = "type")]
    pub kind: Option<Value>,
    pub ts: Option<Value>,
    pub window_ms: Option<Value>,
    #[serde(rename = "targetId")]
    pub target_id: Option<Value>,
}

impl EventReport {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: Some(Value::from(kind)),
            ..Self::default()
        }
    }

    fn kind(&self) -> Option<EventKind> {
        self.kind.as_ref().and_then(Value::as_str).map(EventKind::from)
    }

    /// Reported timestamp, or now when it is missing, zero or not a number.
    #[allow(clippy::cast_possible_truncation)]
    fn ts(&self) -> i64 {
        coerce::number(self.ts.as_ref())
            .filter(|ts| *ts != 0.0)
            .map_or_else(|| Utc::now().timestamp_millis(), |ts| ts as i64)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn window_ms(&self, current: u64) -> u64 {
        coerce::number(self.window_ms.as_ref())
            .filter(|window_ms| *window_ms >= 1.0)
            .map_or(current, |window_ms| window_ms as u64)
    }

    fn target_id(&self) -> Option<Number> {
        match &self.target_id {
            Some(Value::Number(id)) => Some(id.clone()),
            _ => None,
        }
    }
}

impl Game {
    /// Scores a reported event and rebroadcasts it.
    ///
    /// While paused (which includes a running countdown) the report is
    /// dropped without touching anything. Kinds other than hit and miss
    /// leave the counters alone but are still logged and broadcast.
    pub async fn report_event(&self, report: &EventReport) -> EventReceipt {
        let mut core = self.lock().await;

        if core.state.paused {
            tracing::debug!(kind = ?report.kind, "event ignored while paused");
            return EventReceipt::ignored();
        }

        let kind = report.kind();
        match kind {
            Some(EventKind::Hit) => core.score.hits += 1,
            Some(EventKind::Miss) => core.score.misses += 1,
            _ => tracing::debug!(?kind, "unscored event type passed through"),
        }

        let event = GameEvent {
            kind,
            ts: report.ts(),
            window_ms: report.window_ms(core.state.window_ms),
            target_id: report.target_id(),
            score: core.score,
        };
        core.history.push(event.clone());

        self.publish_score(&core);
        self.publish(Notification::Event(event));

        tracing::info!(
            hits = core.score.hits,
            misses = core.score.misses,
            "event recorded"
        );

        EventReceipt::accepted()
    }
}
