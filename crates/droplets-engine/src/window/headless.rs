use std::time::Duration;

use crate::config::TRAIL_LENGTH;
use crate::coords::Vec2;
use crate::input::{InputEvent, PointerMoveEvent, PointerState};
use crate::render::{RenderOutcome, RenderState};
use crate::scene::Scene;
use crate::time::ManualClock;

/// Configuration for a display-less run.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    pub ticks: u64,
    /// Simulated spacing between driver ticks.
    pub tick_interval: Duration,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            ticks: 120,
            tick_interval: Duration::from_millis(16),
        }
    }
}

/// Summary of a headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessReport {
    pub ticks: u64,
    /// Ticks the frame governor let through.
    pub accepted: u64,
    pub throttled: u64,
    pub elapsed_time: f32,
    pub trail: [Vec2; TRAIL_LENGTH],
}

/// Runs the full lifecycle without a display or GPU.
///
/// Time is simulated, so a run of any length finishes immediately and is
/// reproducible. Useful for pre-render checks and smoke tests.
pub struct HeadlessDriver {
    config: HeadlessConfig,
}

impl HeadlessDriver {
    pub fn new(config: HeadlessConfig) -> Self {
        Self { config }
    }

    /// Drives `config.ticks` ticks, feeding `pointer_path(tick)` as the
    /// pointer position before each one.
    pub fn run(&self, mut pointer_path: impl FnMut(u64) -> Vec2) -> HeadlessReport {
        let clock = ManualClock::new();
        let mut state = RenderState::headless();
        let mut scene = Scene::with_clock(&state, Box::new(clock.clone()));
        let mut pointer = PointerState::default();

        state.init();
        scene.init(&state);

        let mut accepted = 0;
        let mut throttled = 0;

        for tick in 0..self.config.ticks {
            let Vec2 { x, y } = pointer_path(tick);
            pointer.apply_event(&InputEvent::PointerMoved(PointerMoveEvent { x, y }));

            state.update();
            match scene.update(&mut state, &pointer) {
                RenderOutcome::Throttled => throttled += 1,
                _ => accepted += 1,
            }

            clock.advance(self.config.tick_interval);
        }

        let report = HeadlessReport {
            ticks: self.config.ticks,
            accepted,
            throttled,
            elapsed_time: state.elapsed_time(),
            trail: *scene.trail().samples(),
        };

        log::info!(
            "headless run: {} ticks, {} accepted, {} throttled",
            report.ticks,
            report.accepted,
            report.throttled
        );
        report
    }
}
