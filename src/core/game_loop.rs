//! The run loop: owns the session and decides whether ticks happen.

use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use crate::core::constants::TICK_INTERVAL_MS;
use crate::core::game_state::GameSession;
use crate::core::tick::{game_tick, TickEvent, TickResult};
use crate::error::{ActionError, Result};
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
    /// A tick panicked. The loop stays down until restarted.
    Faulted(String),
}

/// Drives a [`GameSession`] one tick at a time while a run is active.
#[derive(Debug, Clone)]
pub struct GameLoop {
    pub session: GameSession,
    state: LoopState,
    interval: Duration,
}

impl GameLoop {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            state: LoopState::Stopped,
            interval: Duration::from_millis(TICK_INTERVAL_MS),
        }
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Wall-clock time between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Arm the loop. A running loop is restarted: the live enemy is dropped
    /// and the next tick spawns a fresh one.
    pub fn start(&mut self) {
        if self.is_running() {
            log::debug!("Restarting active run");
        }
        self.session.leave_combat();
        self.state = LoopState::Running;
        log::info!("Run started in {}", self.session.dungeon.current().id);
    }

    /// Disarm the loop, leaving state as of the last finished tick.
    pub fn stop(&mut self) -> Result<TickEvent> {
        if !self.is_running() {
            return Err(ActionError::RunNotActive);
        }
        self.halt("stopped by player".to_string());
        Ok(TickEvent::RunStopped {
            reason: "stopped by player".to_string(),
        })
    }

    fn halt(&mut self, reason: String) {
        self.session.leave_combat();
        self.state = LoopState::Stopped;
        log::info!("Run stopped: {}", reason);
    }

    /// Run one tick. Only valid while running. Hero death stops the loop; a
    /// panicking tick faults it.
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> Result<TickResult> {
        if !self.is_running() {
            return Err(ActionError::RunNotActive);
        }

        let session = &mut self.session;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| game_tick(session, rng)));
        let mut result = match outcome {
            Ok(result) => result,
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                log::error!("Tick failed: {}", reason);
                self.state = LoopState::Faulted(reason.clone());
                return Ok(TickResult {
                    events: vec![TickEvent::RunStopped { reason }],
                    hero_died: false,
                });
            }
        };

        if result.hero_died {
            let reason = "hero was defeated".to_string();
            self.halt(reason.clone());
            result.events.push(TickEvent::RunStopped { reason });
        }
        Ok(result)
    }

    /// Tick up to `max_ticks` times, stopping early once the loop leaves
    /// Running. Returns every event in order.
    pub fn run_for<R: Rng>(&mut self, max_ticks: u64, rng: &mut R) -> Vec<TickEvent> {
        let mut events = Vec::new();
        for _ in 0..max_ticks {
            match self.tick(rng) {
                Ok(result) => events.extend(result.events),
                Err(_) => break,
            }
        }
        events
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
