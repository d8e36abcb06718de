// Single-slot countdown that resumes the game after a delay.
//
// States: Idle -> CountingDown -> Active. Starting replaces whatever is
// pending; a completion only applies if it still belongs to the countdown in
// the slot.

use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::Instant;
use types::{CountdownNotice, Notification};

use crate::game::{Game, GameCore, COUNTDOWN_CEILING_SECS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    /// Nothing pending; the last countdown, if any, was cancelled.
    Idle,
    CountingDown { seconds_remaining: u64 },
    /// The last countdown ran to completion.
    Active,
}

#[derive(Debug)]
struct ScheduledCountdown {
    id: u64,
    deadline: Instant,
    task: AbortHandle,
}

#[derive(Debug, Default)]
pub struct CountdownTimer {
    current: Option<ScheduledCountdown>,
    completed: bool,
    next_id: u64,
}

impl CountdownTimer {
    pub fn phase(&self, now: Instant) -> CountdownPhase {
        match &self.current {
            Some(scheduled) => {
                let left = scheduled.deadline.saturating_duration_since(now);
                CountdownPhase::CountingDown {
                    seconds_remaining: ceil_secs(left),
                }
            }
            None if self.completed => CountdownPhase::Active,
            None => CountdownPhase::Idle,
        }
    }

    pub const fn is_pending(&self) -> bool {
        self.current.is_some()
    }

    /// Drops the pending countdown, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.completed = false;
        match self.current.take() {
            Some(scheduled) => {
                scheduled.task.abort();
                tracing::debug!(id = scheduled.id, "countdown cancelled");
                true
            }
            None => false,
        }
    }

    fn reserve_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn arm(&mut self, id: u64, deadline: Instant, task: AbortHandle) {
        self.current = Some(ScheduledCountdown { id, deadline, task });
    }

    /// Clears the slot if it still holds countdown `id`.
    fn complete(&mut self, id: u64) -> bool {
        match &self.current {
            Some(scheduled) if scheduled.id == id => {
                self.current = None;
                self.completed = true;
                true
            }
            _ => false,
        }
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

impl Game {
    /// Pauses, announces a countdown of `secs`, and schedules the resume.
    pub async fn start_countdown(&self, secs: u64) {
        let mut core = self.lock().await;
        self.begin_countdown(&mut core, secs);
    }

    /// `secs` is capped at [`COUNTDOWN_CEILING_SECS`].
    pub(crate) fn begin_countdown(&self, core: &mut GameCore, secs: u64) {
        let secs = secs.min(COUNTDOWN_CEILING_SECS);
        let replaced = core.countdown.cancel();

        core.state.paused = true;
        self.publish_config(core);
        self.publish(Notification::Countdown(CountdownNotice { sec: secs }));

        let id = core.countdown.reserve_id();
        let deadline = Instant::now() + Duration::from_secs(secs);
        let game = self.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            game.finish_countdown(id).await;
        });
        core.countdown.arm(id, deadline, task.abort_handle());

        tracing::info!(id, secs, replaced, "countdown started");
    }

    async fn finish_countdown(&self, id: u64) {
        let mut core = self.lock().await;
        if !core.countdown.complete(id) {
            tracing::debug!(id, "stale countdown completion ignored");
            return;
        }

        core.state.paused = false;
        self.publish_config(&core);

        tracing::info!(id, "countdown finished, game resumed");
    }
}
