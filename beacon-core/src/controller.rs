//! Device-side lighting controller
//!
//! Ties the startup sequence, the dispatcher and the animation engine
//! together behind two entry points: [`LightController::handle`] for host
//! commands and [`LightController::poll`] for the passage of time.

use beacon_protocol::{Command, StripId, STRIP_COUNT};
use rand::RngCore;

use crate::animation::AnimationEngine;
use crate::dispatch::{Dispatcher, Outcome};
use crate::palette::rgb;
use crate::startup::StartupSequence;
use crate::traits::LedStrip;

pub struct LightController<S, R> {
    engine: AnimationEngine<S, R>,
    dispatcher: Dispatcher,
    startup: StartupSequence,
}

impl<S: LedStrip, R: RngCore> LightController<S, R> {
    /// Create a controller; the startup sequence begins at `now_ms`
    pub fn new(strips: [S; STRIP_COUNT], rng: R, now_ms: u64) -> Self {
        Self {
            engine: AnimationEngine::new(strips, rng),
            dispatcher: Dispatcher::new(),
            startup: StartupSequence::new(now_ms),
        }
    }

    /// Apply a command from the host, ending the startup sequence
    pub fn handle(&mut self, command: Command, now_ms: u64) -> Outcome {
        self.startup.abort();
        self.dispatcher.dispatch(command, &mut self.engine, now_ms)
    }

    /// Run startup steps and animations that are due
    pub fn poll(&mut self, now_ms: u64) {
        if let Some(color) = self.startup.poll(now_ms) {
            self.engine.fill_all(rgb(color));
        }
        self.engine.poll(now_ms);
    }

    /// Earliest time [`poll`](Self::poll) has work to do
    pub fn next_deadline(&self) -> Option<u64> {
        match (self.startup.next_deadline(), self.engine.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn in_startup(&self) -> bool {
        !self.startup.is_finished()
    }

    pub fn strip_mut(&mut self, id: StripId) -> &mut S {
        self.engine.strip_mut(id)
    }

    pub fn strips_mut(&mut self) -> &mut [S; STRIP_COUNT] {
        self.engine.strips_mut()
    }

    pub fn engine(&self) -> &AnimationEngine<S, R> {
        &self.engine
    }
}
