use serde::Deserialize;
use serde_json::Value;
use types::{
    Difficulty, GameMode, GameState, MIN_MARATHON_S, MIN_SHRINK_MS,
    MIN_SWITCH_MS, MIN_WINDOW_MS,
};

use crate::coerce;
use crate::game::Game;

/// Body of `PUT /config`. Every field is optional and loosely typed; values
/// that do not validate are skipped individually.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigPatch {
    pub difficulty: Option<Value>,
    pub window_ms: Option<Value>,
    pub mode: Option<Value>,
    pub switch_ms: Option<Value>,
    pub shrink_ms: Option<Value>,
    pub marathon_s: Option<Value>,
}

impl ConfigPatch {
    /// Applies the recognized fields in place and returns their names.
    ///
    /// `difficulty` goes first so an explicit `window_ms` in the same patch
    /// overrides the window it implies.
    fn apply_to(&self, state: &mut GameState) -> Vec<&'static str> {
        let mut applied = Vec::new();

        if let Some(difficulty) = coerce::text(self.difficulty.as_ref())
            .and_then(|s| s.parse::<Difficulty>().ok())
        {
            state.difficulty = difficulty;
            state.window_ms = difficulty.window_ms();
            applied.push("difficulty");
        }

        if let Some(window_ms) =
            coerce::integer_at_least(self.window_ms.as_ref(), MIN_WINDOW_MS)
        {
            state.window_ms = window_ms;
            applied.push("window_ms");
        }

        if let Some(mode) = coerce::text(self.mode.as_ref())
            .and_then(|s| s.parse::<GameMode>().ok())
        {
            state.mode = mode;
            applied.push("mode");
        }

        if let Some(switch_ms) =
            coerce::integer_at_least(self.switch_ms.as_ref(), MIN_SWITCH_MS)
        {
            state.switch_ms = switch_ms;
            applied.push("switch_ms");
        }

        if let Some(shrink_ms) =
            coerce::integer_at_least(self.shrink_ms.as_ref(), MIN_SHRINK_MS)
        {
            state.shrink_ms = shrink_ms;
            applied.push("shrink_ms");
        }

        if let Some(marathon_s) =
            coerce::integer_at_least(self.marathon_s.as_ref(), MIN_MARATHON_S)
        {
            state.marathon_s = marathon_s;
            applied.push("marathon_s");
        }

        applied
    }
}

impl Game {
    pub async fn get_config(&self) -> GameState {
        self.lock().await.state.clone()
    }

    /// Applies `patch`, then forces the pause-countdown-resume cycle even if
    /// nothing changed. Returns the state as of right now, i.e. paused.
    pub async fn apply_config(&self, patch: &ConfigPatch) -> GameState {
        let mut core = self.lock().await;

        let applied = patch.apply_to(&mut core.state);
        tracing::info!(?applied, "configuration updated");

        self.begin_countdown(&mut core, self.settings().countdown_secs);

        core.state.clone()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::game::GameSettings;
    use serde_json::json;
    use tokio::time::Instant;
    use types::Notification;

    fn patch(value: Value) -> ConfigPatch {
        serde_json::from_value(value).unwrap()
    }

    fn apply(value: Value) -> GameState {
        let mut state = GameState::default();
        patch(value).apply_to(&mut state);
        state
    }

    #[test]
    fn test_difficulty_sets_window() {
        for (name, window_ms) in
            [("easy", 5000), ("medium", 3000), ("hard", 2000), ("facil", 5000)]
        {
            assert_eq!(apply(json!({ "difficulty": name })).window_ms, window_ms);
        }
    }

    #[test]
    fn test_unknown_difficulty_is_ignored() {
        let state = apply(json!({ "difficulty": "nightmare" }));
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn test_explicit_window_overrides_difficulty() {
        let state = apply(json!({ "difficulty": "hard", "window_ms": 4500 }));
        assert_eq!(state.difficulty, Difficulty::Hard);
        assert_eq!(state.window_ms, 4500);
    }

    #[test]
    fn test_numeric_fields_clamp_to_floor() {
        let state = apply(json!({
            "window_ms": 50,
            "switch_ms": 5,
            "shrink_ms": 1,
            "marathon_s": 0,
        }));

        assert_eq!(state.window_ms, 200);
        assert_eq!(state.switch_ms, 100);
        assert_eq!(state.shrink_ms, 10);
        assert_eq!(state.marathon_s, 5);
    }

    #[test]
    fn test_non_numeric_values_are_ignored() {
        let state = apply(json!({
            "window_ms": "1000",
            "switch_ms": null,
            "shrink_ms": true,
            "marathon_s": [30],
            "mode": 3,
        }));

        assert_eq!(state, GameState::default());
    }

    #[test]
    fn test_mode_accepts_aliases() {
        assert_eq!(apply(json!({ "mode": "rayo_loco" })).mode, GameMode::ChaosRay);
        assert_eq!(apply(json!({ "mode": "marathon" })).mode, GameMode::Marathon);
        assert_eq!(apply(json!({ "mode": "pinball" })).mode, GameMode::Shot);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let mut state = GameState::default();
        let applied = patch(json!({ "paused": false, "color": "red" }))
            .apply_to(&mut state);

        assert!(applied.is_empty());
        assert_eq!(state, GameState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_config_scenario() {
        let game = Game::new(GameSettings::default());
        let mut sub = game.bus().subscribe();
        let started = Instant::now();

        let state = game
            .apply_config(&patch(json!({ "difficulty": "facil" })))
            .await;
        assert_eq!(state.window_ms, 5000);
        assert!(state.paused);

        let mut configs = Vec::new();
        while configs.len() < 2 {
            if let Some(Notification::Config(config)) = sub.next().await {
                configs.push((config, started.elapsed()));
            }
        }

        assert!(configs[0].0.paused);
        assert_eq!(configs[0].0.window_ms, 5000);
        assert_eq!(configs[0].1, Duration::ZERO);
        assert!(!configs[1].0.paused);
        assert!(configs[1].1 >= Duration::from_secs(3));
        assert!(configs[1].1 < Duration::from_millis(3010));
        assert!(!game.get_config().await.paused);
    }

    #[tokio::test(start_paused = true)]
    async fn test_apply_config_without_changes_still_counts_down() {
        let game = Game::with_state(
            GameSettings::default(),
            GameState {
                paused: false,
                ..GameState::default()
            },
        );

        let state = game.apply_config(&ConfigPatch::default()).await;
        assert!(state.paused);

        tokio::time::sleep(Duration::from_millis(3010)).await;
        assert!(!game.get_config().await.paused);
    }
}
