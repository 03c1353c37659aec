use std::fmt;

use log::{debug, info, warn};

use crate::constants::TICK_INTERVAL_MS;
use crate::errors::{SimulationError, SimulationResult};
use crate::telemetry_system::telemetry::{Frame, SimulationObserver};
use crate::trajectory_system::{aerodynamics::Aerodynamics, kinematics::Kinematics};

use super::config::SimulationConfig;
use super::driver::{Clock, IntervalDriver, SystemClock, TickDriver};

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Landed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "Idle",
            Phase::Running => "Running",
            Phase::Paused => "Paused",
            Phase::Landed => "Landed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationState {
    pub position: f64,
    pub velocity: f64,
    pub elapsed_seconds: f64,
    pub phase: Phase,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The engine was not running, or the step was not a positive finite number;
    /// nothing changed.
    Skipped,
    Advanced(Frame),
    /// This tick reached the ground.
    Landed(Frame),
}

/// Owns one falling body and its lifecycle.
///
/// Elapsed time comes from the clock (`now - start_epoch`), while velocity and
/// position advance by the fixed `dt` handed to [`FreefallEngine::tick`].
pub struct FreefallEngine<C: Clock = SystemClock, D: TickDriver = IntervalDriver> {
    config: SimulationConfig,
    aerodynamics: Aerodynamics,
    kinematics: Kinematics,
    elapsed_seconds: f64,
    drag_force: f64,
    start_epoch_ms: f64,
    phase: Phase,
    clock: C,
    driver: D,
    observers: Vec<Box<dyn SimulationObserver>>,
}

impl FreefallEngine {
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        FreefallEngine::with_parts(config, SystemClock::new(), IntervalDriver::new())
    }
}

impl<C: Clock, D: TickDriver> FreefallEngine<C, D> {
    pub fn with_parts(config: SimulationConfig, clock: C, driver: D) -> SimulationResult<Self> {
        config.validate()?;

        Ok(FreefallEngine {
            config,
            aerodynamics: Aerodynamics::new(config.drag_coefficient),
            kinematics: Kinematics::default(),
            elapsed_seconds: 0.0,
            drag_force: 0.0,
            start_epoch_ms: 0.0,
            phase: Phase::Idle,
            clock,
            driver,
            observers: Vec::new(),
        })
    }

    pub fn add_observer(&mut self, observer: impl SimulationObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn configure(&mut self, config: SimulationConfig) -> SimulationResult<()> {
        if matches!(self.phase, Phase::Running | Phase::Paused) {
            warn!("Rejected reconfiguration while {}", self.phase);
            return Err(SimulationError::ConfigurationError(format!(
                "cannot reconfigure while {}",
                self.phase
            )));
        }
        config.validate()?;

        self.config = config;
        self.aerodynamics = Aerodynamics::new(config.drag_coefficient);
        info!(
            "Configured drop from {:.2} m (g = {} m/s², k = {})",
            config.initial_height_meters, config.gravity, config.drag_coefficient
        );
        Ok(())
    }

    /// Drops from the configured height, or continues a paused drop.
    pub fn start(&mut self) -> SimulationResult<()> {
        match self.phase {
            Phase::Running => Err(self.reject("start")),
            Phase::Paused => {
                info!("Simulation resumed at {:.2}s", self.elapsed_seconds);
                self.run();
                Ok(())
            }
            Phase::Idle | Phase::Landed => {
                self.kinematics = Kinematics::dropped_from(self.config.initial_height_meters);
                self.elapsed_seconds = 0.0;
                self.drag_force = 0.0;
                info!(
                    "Simulation started from {:.2} m",
                    self.config.initial_height_meters
                );
                self.run();
                Ok(())
            }
        }
    }

    /// Freezes the drop. Pausing an already paused drop does nothing.
    pub fn pause(&mut self) -> SimulationResult<()> {
        match self.phase {
            Phase::Running => {
                self.driver.disarm();
                self.set_phase(Phase::Paused);
                info!("Simulation paused at {:.2}s", self.elapsed_seconds);
                Ok(())
            }
            Phase::Paused => Ok(()),
            Phase::Idle | Phase::Landed => Err(self.reject("pause")),
        }
    }

    pub fn resume(&mut self) -> SimulationResult<()> {
        if self.phase != Phase::Paused {
            return Err(self.reject("resume"));
        }
        self.start()
    }

    pub fn restart(&mut self) {
        self.driver.disarm();
        self.kinematics.reset();
        self.elapsed_seconds = 0.0;
        self.drag_force = 0.0;
        self.set_phase(Phase::Idle);
        info!("Simulation restarted");
    }

    pub fn tick(&mut self, delta_time: f64) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Skipped;
        }
        if !delta_time.is_finite() || delta_time <= 0.0 {
            warn!("Ignoring tick with step {}", delta_time);
            return TickOutcome::Skipped;
        }

        self.elapsed_seconds = (self.clock.now_ms() - self.start_epoch_ms) / 1000.0;

        let step = self
            .kinematics
            .update(delta_time, self.config.gravity, &self.aerodynamics);
        self.drag_force = step.drag_force;

        let frame = self.frame();
        debug!(
            "t={:.2}s h={:.4} m v={:.4} m/s drag={:.4}",
            frame.elapsed_seconds, frame.position, frame.velocity, frame.drag_force
        );
        for observer in self.observers.iter_mut() {
            observer.on_frame(&frame);
        }

        if !step.grounded {
            return TickOutcome::Advanced(frame);
        }

        self.driver.disarm();
        self.set_phase(Phase::Landed);
        info!(
            "Impact at {:.2} m/s after {:.2}s",
            frame.velocity, frame.elapsed_seconds
        );
        for observer in self.observers.iter_mut() {
            observer.on_impact(&frame);
        }
        TickOutcome::Landed(frame)
    }

    pub fn state(&self) -> SimulationState {
        SimulationState {
            position: self.kinematics.position,
            velocity: self.kinematics.velocity,
            elapsed_seconds: self.elapsed_seconds,
            phase: self.phase,
        }
    }

    pub fn frame(&self) -> Frame {
        Frame {
            position: self.kinematics.position,
            velocity: self.kinematics.velocity,
            elapsed_seconds: self.elapsed_seconds,
            drag_force: self.drag_force,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    fn run(&mut self) {
        // Back-date the epoch so elapsed time continues from where it stopped.
        self.start_epoch_ms = self.clock.now_ms() - self.elapsed_seconds * 1000.0;
        self.driver.arm(TICK_INTERVAL_MS);
        self.set_phase(Phase::Running);
    }

    fn set_phase(&mut self, phase: Phase) {
        let previous = self.phase;
        if previous == phase {
            return;
        }
        self.phase = phase;
        debug!("Phase {} -> {}", previous, phase);
        for observer in self.observers.iter_mut() {
            observer.on_phase_change(previous, phase, self.elapsed_seconds);
        }
    }

    fn reject(&self, action: &'static str) -> SimulationError {
        warn!("Cannot {} while {}", action, self.phase);
        SimulationError::InvalidTransition {
            action,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TIME_STEP;
    use crate::control::driver::ManualClock;
    use approx::assert_relative_eq;

    fn engine_with(config: SimulationConfig) -> FreefallEngine<ManualClock, IntervalDriver> {
        FreefallEngine::with_parts(config, ManualClock::new(), IntervalDriver::new()).unwrap()
    }

    fn advance_and_tick(engine: &mut FreefallEngine<ManualClock, IntervalDriver>) -> TickOutcome {
        engine.clock().advance(TICK_INTERVAL_MS as f64);
        engine.tick(TIME_STEP)
    }

    #[test]
    fn test_engine_initial_state() {
        let engine = engine_with(SimulationConfig::default());
        let state = engine.state();

        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.position, 0.0);
        assert_eq!(state.velocity, 0.0);
        assert_eq!(state.elapsed_seconds, 0.0);
        assert!(!engine.driver().is_armed());
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let result = FreefallEngine::with_parts(
            SimulationConfig::new(10.0, 0.0, 0.0),
            ManualClock::new(),
            IntervalDriver::new(),
        );
        assert!(matches!(result, Err(SimulationError::ConfigurationError(_))));
    }

    #[test]
    fn test_start_resets_and_arms_driver() {
        let mut engine = engine_with(SimulationConfig::new(15.0, 9.8, 0.0));
        engine.start().unwrap();

        let state = engine.state();
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.position, 15.0);
        assert_eq!(state.velocity, 0.0);
        assert_eq!(engine.driver().interval_ms(), Some(50));
    }

    #[test]
    fn test_first_tick_in_vacuum() {
        let mut engine = engine_with(SimulationConfig::new(15.0, 9.8, 0.0));
        engine.start().unwrap();

        let outcome = advance_and_tick(&mut engine);
        let state = engine.state();

        assert!(matches!(outcome, TickOutcome::Advanced(_)));
        assert_relative_eq!(state.velocity, 0.49, epsilon = 1e-12);
        assert_relative_eq!(state.position, 14.9755, epsilon = 1e-12);
        assert_relative_eq!(state.elapsed_seconds, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_five_centimetre_drop_lands_on_second_tick() {
        let mut engine = engine_with(SimulationConfig::new(0.05, 9.8, 0.0));
        engine.start().unwrap();

        // 0.05 - 0.49 * 0.05 = 0.0255 m left after the first step.
        assert!(matches!(
            advance_and_tick(&mut engine),
            TickOutcome::Advanced(_)
        ));
        assert_relative_eq!(engine.state().position, 0.0255, epsilon = 1e-12);

        assert!(matches!(
            advance_and_tick(&mut engine),
            TickOutcome::Landed(_)
        ));
        assert_eq!(engine.state().position, 0.0);
    }

    #[test]
    fn test_short_drop_lands_in_one_tick() {
        let mut engine = engine_with(SimulationConfig::new(0.02, 9.8, 0.0));
        engine.start().unwrap();

        let outcome = advance_and_tick(&mut engine);

        assert!(matches!(outcome, TickOutcome::Landed(_)));
        assert_eq!(engine.phase(), Phase::Landed);
        assert_eq!(engine.state().position, 0.0);
        assert!(!engine.driver().is_armed());
        assert_eq!(advance_and_tick(&mut engine), TickOutcome::Skipped);
    }

    #[test]
    fn test_tick_is_noop_unless_running() {
        let mut engine = engine_with(SimulationConfig::default());
        assert_eq!(engine.tick(TIME_STEP), TickOutcome::Skipped);
        assert_eq!(engine.state().position, 0.0);

        engine.start().unwrap();
        advance_and_tick(&mut engine);
        engine.pause().unwrap();
        let paused = engine.state();

        engine.clock().advance(1_000.0);
        assert_eq!(engine.tick(TIME_STEP), TickOutcome::Skipped);
        assert_eq!(engine.state(), paused);
    }

    #[test]
    fn test_bad_time_step_is_skipped() {
        let mut engine = engine_with(SimulationConfig::default());
        engine.start().unwrap();
        advance_and_tick(&mut engine);
        let before = engine.state();

        for delta_time in [0.0, -0.05, f64::NAN, f64::INFINITY] {
            engine.clock().advance(TICK_INTERVAL_MS as f64);
            assert_eq!(engine.tick(delta_time), TickOutcome::Skipped);
        }

        assert_eq!(engine.state(), before);
        assert_eq!(engine.phase(), Phase::Running);
    }

    #[test]
    fn test_unstable_drag_rejected() {
        let mut engine = engine_with(SimulationConfig::default());
        let result = engine.configure(SimulationConfig::new(10.0, 9.8, 1000.0));

        assert!(matches!(result, Err(SimulationError::ConfigurationError(_))));
        assert_eq!(*engine.config(), SimulationConfig::default());
    }

    #[test]
    fn test_drop_at_drag_limit_lands() {
        let drag = SimulationConfig::max_drag_coefficient(9.8);
        let mut engine = engine_with(SimulationConfig::new(10.0, 9.8, drag));
        engine.start().unwrap();

        let mut previous = engine.state().position;
        let mut ticks = 0;
        while engine.phase() == Phase::Running {
            advance_and_tick(&mut engine);
            let state = engine.state();
            assert!(state.velocity > 0.0, "velocity flipped at tick {}", ticks);
            assert!(state.position < previous);
            previous = state.position;
            ticks += 1;
            assert!(ticks < 10_000, "drop at the drag limit never landed");
        }

        assert_eq!(engine.phase(), Phase::Landed);
    }

    #[test]
    fn test_configure_rejected_while_running() {
        let mut engine = engine_with(SimulationConfig::default());
        engine.start().unwrap();
        advance_and_tick(&mut engine);
        let before = engine.state();

        let result = engine.configure(SimulationConfig::new(5.0, 1.62, 0.1));

        assert!(matches!(result, Err(SimulationError::ConfigurationError(_))));
        assert_eq!(engine.state(), before);
        assert_eq!(*engine.config(), SimulationConfig::default());
    }

    #[test]
    fn test_configure_rejected_while_paused() {
        let mut engine = engine_with(SimulationConfig::default());
        engine.start().unwrap();
        engine.pause().unwrap();

        assert!(matches!(
            engine.configure(SimulationConfig::default().with_height(3.0)),
            Err(SimulationError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_configure_after_landing() {
        let mut engine = engine_with(SimulationConfig::new(0.01, 9.8, 0.0));
        engine.start().unwrap();
        advance_and_tick(&mut engine);
        assert_eq!(engine.phase(), Phase::Landed);

        engine
            .configure(SimulationConfig::new(2.0, 1.62, 0.1))
            .unwrap();
        engine.start().unwrap();

        assert_eq!(engine.state().position, 2.0);
        assert_eq!(engine.state().elapsed_seconds, 0.0);
    }

    #[test]
    fn test_invalid_transitions() {
        let mut engine = engine_with(SimulationConfig::default());

        assert_eq!(
            engine.pause(),
            Err(SimulationError::InvalidTransition {
                action: "pause",
                phase: Phase::Idle
            })
        );
        assert!(matches!(
            engine.resume(),
            Err(SimulationError::InvalidTransition { .. })
        ));

        engine.start().unwrap();
        assert!(matches!(
            engine.start(),
            Err(SimulationError::InvalidTransition { .. })
        ));
        assert!(matches!(
            engine.resume(),
            Err(SimulationError::InvalidTransition { .. })
        ));
        assert_eq!(engine.phase(), Phase::Running);
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut engine = engine_with(SimulationConfig::default());
        engine.start().unwrap();
        advance_and_tick(&mut engine);

        engine.pause().unwrap();
        let paused = engine.state();
        engine.pause().unwrap();

        assert_eq!(engine.state(), paused);
        assert!(!engine.driver().is_armed());
    }

    #[test]
    fn test_resume_continues_elapsed_time() {
        let mut engine = engine_with(SimulationConfig::default());
        engine.start().unwrap();
        advance_and_tick(&mut engine);
        advance_and_tick(&mut engine);
        engine.pause().unwrap();

        engine.clock().advance(7_500.0);
        engine.resume().unwrap();
        assert_eq!(engine.phase(), Phase::Running);
        assert!(engine.driver().is_armed());

        advance_and_tick(&mut engine);
        assert_relative_eq!(engine.state().elapsed_seconds, 0.15, epsilon = 1e-9);
    }

    #[test]
    fn test_start_while_paused_resumes() {
        let mut engine = engine_with(SimulationConfig::default());
        engine.start().unwrap();
        advance_and_tick(&mut engine);
        engine.pause().unwrap();
        let paused = engine.state();

        engine.start().unwrap();

        assert_eq!(engine.state().position, paused.position);
        assert_eq!(engine.state().velocity, paused.velocity);
    }

    #[test]
    fn test_restart_from_every_phase() {
        let mut engine = engine_with(SimulationConfig::new(0.2, 9.8, 0.1));

        let expected = SimulationState {
            position: 0.0,
            velocity: 0.0,
            elapsed_seconds: 0.0,
            phase: Phase::Idle,
        };

        engine.restart();
        assert_eq!(engine.state(), expected);

        engine.start().unwrap();
        advance_and_tick(&mut engine);
        engine.restart();
        assert_eq!(engine.state(), expected);
        assert!(!engine.driver().is_armed());

        engine.start().unwrap();
        advance_and_tick(&mut engine);
        engine.pause().unwrap();
        engine.restart();
        assert_eq!(engine.state(), expected);

        engine.start().unwrap();
        while engine.phase() == Phase::Running {
            advance_and_tick(&mut engine);
        }
        assert_eq!(engine.phase(), Phase::Landed);
        engine.restart();
        assert_eq!(engine.state(), expected);

        engine.start().unwrap();
        assert_eq!(engine.state().position, 0.2);
    }

    #[test]
    fn test_frame_reports_drag() {
        let mut engine = engine_with(SimulationConfig::new(30.0, 9.8, 0.1));
        engine.start().unwrap();
        advance_and_tick(&mut engine);

        // Drag is evaluated on the velocity entering the tick.
        let TickOutcome::Advanced(second) = advance_and_tick(&mut engine) else {
            panic!("drop from 30 m should still be falling");
        };
        assert_relative_eq!(second.drag_force, 0.1 * 0.49 * 0.49, epsilon = 1e-12);
        assert_eq!(second, engine.frame());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Landed.to_string(), "Landed");
        let err = SimulationError::InvalidTransition {
            action: "pause",
            phase: Phase::Idle,
        };
        assert_eq!(err.to_string(), "Invalid transition: cannot pause while Idle");
    }
}
