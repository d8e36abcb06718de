// Bounded history of accepted events.
// Invariant: never holds more than `cap` entries; the oldest is evicted first.

use std::collections::VecDeque;

use types::GameEvent;

use crate::game::Game;

#[derive(Debug)]
pub struct EventLog {
    entries: VecDeque<GameEvent>,
    cap: usize,
}

impl EventLog {
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            entries: VecDeque::with_capacity(cap),
            cap,
        }
    }

    pub fn push(&mut self, event: GameEvent) {
        if self.entries.len() == self.cap {
            self.entries.pop_front();
        }
        self.entries.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn newest_first(&self) -> Vec<GameEvent> {
        self.entries.iter().rev().cloned().collect()
    }
}

impl Game {
    pub async fn events(&self) -> Vec<GameEvent> {
        self.lock().await.history.newest_first()
    }

    /// Forgets the event history. Score and game state are untouched, so no
    /// countdown is started.
    pub async fn clear_events(&self) {
        let mut core = self.lock().await;
        let dropped = core.history.len();
        core.history.clear();
        tracing::info!(dropped, "event history cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{EventKind, ScoreState};

    fn event(ts: i64) -> GameEvent {
        GameEvent {
            kind: Some(EventKind::Hit),
            ts,
            window_ms: 3000,
            target_id: None,
            score: ScoreState::default(),
        }
    }

    #[test]
    fn test_keeps_only_newest() {
        let mut log = EventLog::new(3);
        for ts in 1..=5 {
            log.push(event(ts));
        }

        assert_eq!(log.len(), 3);
        let order: Vec<i64> = log.newest_first().iter().map(|e| e.ts).collect();
        assert_eq!(order, vec![5, 4, 3]);
    }

    #[test]
    fn test_clear() {
        let mut log = EventLog::new(2);
        log.push(event(1));
        log.clear();

        assert!(log.is_empty());
        assert!(log.newest_first().is_empty());
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut log = EventLog::new(0);
        log.push(event(1));
        log.push(event(2));

        assert_eq!(log.newest_first(), vec![event(2)]);
    }
}
