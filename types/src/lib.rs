// Wire model shared by the HTTP API, the push channel and the tests.
//
// Everything here serializes to the JSON shapes viewers and the sensor
// controller already speak, e.g.
//
// ```json
// {"paused":true,"difficulty":"medium","window_ms":3000,"mode":"shot",
//  "switch_ms":400,"shrink_ms":200,"marathon_s":60}
// ```

use serde::{Deserialize, Serialize};

mod utils;

pub use utils::UnknownVariant;

/// Lowest accepted value for `GameState::window_ms`.
pub const MIN_WINDOW_MS: u64 = 200;
/// Lowest accepted value for `GameState::switch_ms`.
pub const MIN_SWITCH_MS: u64 = 100;
/// Lowest accepted value for `GameState::shrink_ms`.
pub const MIN_SHRINK_MS: u64 = 10;
/// Lowest accepted value for `GameState::marathon_s`.
pub const MIN_MARATHON_S: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Difficulty {
    Easy,

    Medium,

    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum GameMode {
    /// One target at a time.
    Shot,

    /// The active target jumps every `switch_ms`.
    ChaosRay,

    Sequence,

    /// The hit window shrinks by `shrink_ms` after every hit.
    Hunt,

    /// Timed run of `marathon_s` seconds.
    Marathon,
}

/// Shared game configuration plus the pause flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub paused: bool,

    pub difficulty: Difficulty,

    pub window_ms: u64,

    pub mode: GameMode,

    pub switch_ms: u64,

    pub shrink_ms: u64,

    pub marathon_s: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            paused: true,
            difficulty: Difficulty::Medium,
            window_ms: Difficulty::Medium.window_ms(),
            mode: GameMode::Shot,
            switch_ms: 400,
            shrink_ms: 200,
            marathon_s: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    pub hits: u64,

    pub misses: u64,
}

/// Kind of a reported event. Anything other than `hit` or `miss` is kept
/// verbatim so it can be passed through to viewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    Hit,

    Miss,

    Other(String),
}

/// An accepted event as broadcast to viewers and kept in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EventKind>,

    /// Epoch milliseconds.
    pub ts: i64,

    pub window_ms: u64,

    /// Passed through as reported, fractions included.
    #[serde(rename = "targetId")]
    pub target_id: Option<serde_json::Number>,

    /// Score right after this event was applied.
    pub score: ScoreState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownNotice {
    pub sec: u64,
}

/// Message pushed to every connected viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Notification {
    Config(GameState),

    Score(ScoreState),

    Countdown(CountdownNotice),

    Event(GameEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub state: GameState,

    pub score: ScoreState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PauseResponse {
    pub paused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub const fn ok() -> Self {
        Self { ok: true }
    }
}

/// Reply to the sensor controller for `POST /event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventReceipt {
    Ignored { ignored: bool },

    Accepted { ok: bool },
}

impl EventReceipt {
    pub const fn ignored() -> Self {
        Self::Ignored { ignored: true }
    }

    pub const fn accepted() -> Self {
        Self::Accepted { ok: true }
    }

    pub const fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored { ignored: true })
    }
}
