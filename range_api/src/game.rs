// The single owner of game state, score, countdown and event history.
//
// Every operation takes the core lock for its whole mutation and publishes
// while still holding it, so viewers see notifications in mutation order.
// The operations themselves live next to the concern they implement:
// `config_service`, `countdown`, `control`, `ingest` and `history`.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;
use types::{GameState, Notification, ScoreState, StateSnapshot};

use crate::bus::{NotificationBus, Subscription};
use crate::countdown::{CountdownPhase, CountdownTimer};
use crate::history::EventLog;

/// Longest countdown the game will schedule, whatever the configuration says.
pub const COUNTDOWN_CEILING_SECS: u64 = 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub countdown_secs: u64,
    pub max_countdown_secs: u64,
    pub event_history: usize,
    pub bus_capacity: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            countdown_secs: 3,
            max_countdown_secs: 60,
            event_history: 100,
            bus_capacity: 64,
        }
    }
}

#[derive(Debug)]
pub(crate) struct GameCore {
    pub(crate) state: GameState,
    pub(crate) score: ScoreState,
    pub(crate) countdown: CountdownTimer,
    pub(crate) history: EventLog,
}

/// Cheap to clone; all clones share the same game.
#[derive(Debug, Clone)]
pub struct Game {
    core: Arc<Mutex<GameCore>>,
    bus: NotificationBus,
    settings: GameSettings,
}

impl Game {
    pub fn new(settings: GameSettings) -> Self {
        Self::with_state(settings, GameState::default())
    }

    pub fn with_state(settings: GameSettings, state: GameState) -> Self {
        let core = GameCore {
            state,
            score: ScoreState::default(),
            countdown: CountdownTimer::default(),
            history: EventLog::new(settings.event_history),
        };

        Self {
            core: Arc::new(Mutex::new(core)),
            bus: NotificationBus::new(settings.bus_capacity),
            settings,
        }
    }

    pub const fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub const fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, GameCore> {
        self.core.lock().await
    }

    pub(crate) fn publish(&self, notification: Notification) {
        let delivered = self.bus.publish(notification);
        tracing::trace!(delivered, "notification published");
    }

    pub(crate) fn publish_config(&self, core: &GameCore) {
        self.publish(Notification::Config(core.state.clone()));
    }

    pub(crate) fn publish_score(&self, core: &GameCore) {
        self.publish(Notification::Score(core.score));
    }

    pub async fn score(&self) -> ScoreState {
        self.lock().await.score
    }

    pub async fn snapshot(&self) -> StateSnapshot {
        let core = self.lock().await;
        StateSnapshot {
            state: core.state.clone(),
            score: core.score,
        }
    }

    pub async fn countdown_phase(&self) -> CountdownPhase {
        self.lock().await.countdown.phase(Instant::now())
    }

    /// Subscribes a new viewer and returns the messages it should be sent
    /// before anything from the subscription: current config, current score,
    /// and the remaining countdown if one is running.
    ///
    /// The subscription is taken under the core lock, so nothing published
    /// after the snapshot can be missed.
    pub async fn connect_viewer(&self) -> (Vec<Notification>, Subscription) {
        let core = self.lock().await;
        let subscription = self.bus.subscribe();

        let mut greeting = vec![
            Notification::Config(core.state.clone()),
            Notification::Score(core.score),
        ];
        if let CountdownPhase::CountingDown { seconds_remaining } =
            core.countdown.phase(Instant::now())
        {
            greeting.push(Notification::Countdown(types::CountdownNotice {
                sec: seconds_remaining,
            }));
        }

        (greeting, subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{CountdownNotice, Difficulty};

    #[tokio::test]
    async fn test_initial_snapshot() {
        let game = Game::new(GameSettings::default());
        let snapshot = game.snapshot().await;

        assert!(snapshot.state.paused);
        assert_eq!(snapshot.state.difficulty, Difficulty::Medium);
        assert_eq!(snapshot.state.window_ms, 3000);
        assert_eq!(snapshot.score, ScoreState::default());
        assert_eq!(game.countdown_phase().await, CountdownPhase::Idle);
    }

    #[tokio::test]
    async fn test_connect_viewer_greeting_without_countdown() {
        let game = Game::new(GameSettings::default());
        let (greeting, _sub) = game.connect_viewer().await;

        assert_eq!(
            greeting,
            vec![
                Notification::Config(GameState::default()),
                Notification::Score(ScoreState::default()),
            ]
        );
        assert_eq!(game.bus().subscriber_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_viewer_during_countdown() {
        let game = Game::new(GameSettings::default());
        game.start_countdown(5).await;
        tokio::time::sleep(std::time::Duration::from_millis(1500)).await;

        let (greeting, _sub) = game.connect_viewer().await;

        assert_eq!(
            greeting.last(),
            Some(&Notification::Countdown(CountdownNotice { sec: 4 }))
        );
    }
}
