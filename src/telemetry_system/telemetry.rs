use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use crate::control::engine::Phase;

/// What a renderer needs to draw one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub position: f64,
    pub velocity: f64,
    pub elapsed_seconds: f64,
    pub drag_force: f64,
}

/// Hooks fired by the engine. All methods default to no-ops.
pub trait SimulationObserver {
    fn on_frame(&mut self, _frame: &Frame) {}

    fn on_phase_change(&mut self, _from: Phase, _to: Phase, _elapsed_seconds: f64) {}

    /// Fires once per start-to-landing cycle.
    fn on_impact(&mut self, _frame: &Frame) {}
}

impl<T: SimulationObserver> SimulationObserver for Rc<RefCell<T>> {
    fn on_frame(&mut self, frame: &Frame) {
        self.borrow_mut().on_frame(frame);
    }

    fn on_phase_change(&mut self, from: Phase, to: Phase, elapsed_seconds: f64) {
        self.borrow_mut().on_phase_change(from, to, elapsed_seconds);
    }

    fn on_impact(&mut self, frame: &Frame) {
        self.borrow_mut().on_impact(frame);
    }
}

/// Records one drop. A fresh start (from `Idle` or `Landed`) clears the previous drop;
/// resuming from `Paused` keeps it.
#[derive(Debug, Default)]
pub struct Telemetry {
    pub frames: Vec<Frame>,
    max_velocity: f64,
    max_drag_force: f64,
    impacts: Vec<Frame>,
    state_times: Vec<(Phase, f64)>,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_velocity(&self) -> f64 {
        self.max_velocity
    }

    pub fn max_drag_force(&self) -> f64 {
        self.max_drag_force
    }

    pub fn impact_count(&self) -> usize {
        self.impacts.len()
    }

    pub fn last_impact(&self) -> Option<&Frame> {
        self.impacts.last()
    }

    pub fn state_times(&self) -> &[(Phase, f64)] {
        &self.state_times
    }

    pub fn clear(&mut self) {
        *self = Telemetry::default();
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "--- Simulation Summary ---");
        let _ = writeln!(out, "Ticks: {}", self.frames.len());
        let _ = writeln!(out, "Max Velocity: {:.2} m/s", self.max_velocity);
        let _ = writeln!(out, "Max Drag: {:.2} m/s²", self.max_drag_force);
        match self.last_impact() {
            Some(impact) => {
                let _ = writeln!(
                    out,
                    "Impact: {:.2} m/s after {}",
                    impact.velocity,
                    Self::format_time(impact.elapsed_seconds)
                );
            }
            None => {
                let _ = writeln!(out, "Impact: none");
            }
        }

        let _ = writeln!(out, "--- Phase Transitions ---");
        for (phase, time) in &self.state_times {
            let _ = writeln!(out, "{} at {}", phase, Self::format_time(*time));
        }

        out
    }
}

impl SimulationObserver for Telemetry {
    fn on_frame(&mut self, frame: &Frame) {
        self.max_velocity = self.max_velocity.max(frame.velocity);
        self.max_drag_force = self.max_drag_force.max(frame.drag_force);
        self.frames.push(*frame);
    }

    fn on_phase_change(&mut self, from: Phase, to: Phase, elapsed_seconds: f64) {
        if to == Phase::Running && matches!(from, Phase::Idle | Phase::Landed) {
            self.clear();
        }
        self.state_times.push((to, elapsed_seconds));
    }

    fn on_impact(&mut self, frame: &Frame) {
        self.impacts.push(*frame);
    }
}
