//! Session driver: the only mutator of `GameState`.
//!
//! Inputs become instantaneous edits between ticks.  While a game is running
//! exactly one tick ticket is pending with the scheduler; it is released when
//! the game ends, on `shutdown`, and on drop.

use log::{debug, info, warn};
use rand::Rng;

use crate::compute::{apply_intent, init_state, tick};
use crate::config::{ConfigError, GameConfig};
use crate::entities::{GameState, Intent, Phase};
use crate::input::{route, RawInput};
use crate::scheduler::{FrameScheduler, TicketId};

pub struct GameLoop<S: FrameScheduler, R: Rng> {
    state: GameState,
    config: GameConfig,
    scheduler: S,
    rng: R,
    pending: Option<TicketId>,
}

impl<S: FrameScheduler, R: Rng> GameLoop<S, R> {
    pub fn new(config: GameConfig, scheduler: S, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(GameLoop {
            state: init_state(&config),
            config,
            scheduler,
            rng,
            pending: None,
        })
    }

    /// Read-only snapshot for the presentation layer.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn pending_ticket(&self) -> Option<TicketId> {
        self.pending
    }

    /// Route a raw press by the current phase and apply the resulting intent.
    pub fn handle_input(&mut self, input: RawInput) -> Intent {
        let intent = route(self.state.phase, input);
        self.apply(intent);
        intent
    }

    /// Apply an intent immediately.  Entering Playing registers the first tick.
    pub fn apply(&mut self, intent: Intent) {
        let was = self.state.phase;
        self.state = apply_intent(&self.state, intent, &self.config);

        if was != Phase::Playing && self.state.phase == Phase::Playing {
            info!("game started (high score {})", self.state.high_score);
            self.release();
            self.pending = Some(self.scheduler.request_tick());
        }
    }

    /// Scheduler callback.  Tickets other than the pending one are stale and
    /// are ignored.  Returns whether a tick ran.
    pub fn on_tick(&mut self, ticket: TicketId) -> bool {
        if self.pending != Some(ticket) {
            warn!("ignoring stale tick {:?}", ticket);
            return false;
        }
        self.pending = None;

        self.state = tick(&self.state, &self.config, &mut self.rng);

        match self.state.phase {
            Phase::Playing => self.pending = Some(self.scheduler.request_tick()),
            _ => info!(
                "game over: score {} after {} ticks, high score {}",
                self.state.display_score(),
                self.state.frame,
                self.state.high_score
            ),
        }
        true
    }

    /// Stop the loop: cancel any pending tick.  Safe to call repeatedly.
    pub fn shutdown(&mut self) {
        if self.pending.is_some() {
            debug!("shutting down with a tick pending");
        }
        self.release();
    }

    fn release(&mut self) {
        if let Some(ticket) = self.pending.take() {
            self.scheduler.cancel_tick(ticket);
        }
    }
}

impl<S: FrameScheduler, R: Rng> Drop for GameLoop<S, R> {
    fn drop(&mut self) {
        self.release();
    }
}
