//! Tick scheduling abstraction.
//!
//! The simulation itself is host-agnostic: anything that can call
//! `tick(dt_ms)` once per frame can drive it. The wasm front end uses the
//! browser's frame callback; tests and native hosts use `FixedTimestep`.

use crate::sim::Simulation;

/// A drivable animation target.
pub trait Ticker {
    /// Begin honoring ticks.
    fn start(&mut self);
    /// Stop honoring ticks; no partial step is applied.
    fn stop(&mut self);
    /// Advance by one frame of `dt_ms` milliseconds.
    fn tick(&mut self, dt_ms: f64);
}

impl Ticker for Simulation {
    fn start(&mut self) {
        self.start_animation();
    }

    fn stop(&mut self) {
        self.stop_animation();
    }

    fn tick(&mut self, dt_ms: f64) {
        Simulation::tick(self, dt_ms);
    }
}

/// Fixed-timestep driver for deterministic playback.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestep {
    /// Milliseconds per frame.
    pub dt_ms: f64,
}

impl FixedTimestep {
    /// 60 frames per second.
    pub fn sixty_hz() -> Self {
        Self { dt_ms: 1000.0 / 60.0 }
    }

    pub fn new(dt_ms: f64) -> Self {
        Self { dt_ms }
    }

    /// Drive a ticker for `frames` fixed-length frames.
    pub fn run(&self, target: &mut dyn Ticker, frames: usize) {
        for _ in 0..frames {
            target.tick(self.dt_ms);
        }
    }
}
