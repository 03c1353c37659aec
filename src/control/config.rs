use crate::constants::{DEFAULT_HEIGHT_METERS, EARTH_GRAVITY, MAX_HEIGHT_METERS, TIME_STEP};
use crate::errors::{SimulationError, SimulationResult};

use super::environment::{Atmosphere, CelestialBody};

/// Inputs for one drop: where it starts and what acts on it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    pub initial_height_meters: f64,
    pub gravity: f64,
    pub drag_coefficient: f64,
}

impl SimulationConfig {
    pub fn new(initial_height_meters: f64, gravity: f64, drag_coefficient: f64) -> Self {
        SimulationConfig {
            initial_height_meters,
            gravity,
            drag_coefficient,
        }
    }

    pub fn from_presets(
        initial_height_meters: f64,
        body: CelestialBody,
        atmosphere: Atmosphere,
    ) -> Self {
        SimulationConfig::new(
            initial_height_meters,
            body.surface_gravity(),
            atmosphere.drag_coefficient(),
        )
    }

    pub fn with_height(mut self, initial_height_meters: f64) -> Self {
        self.initial_height_meters = initial_height_meters;
        self
    }

    /// Largest drag coefficient the fixed step can integrate under `gravity`.
    ///
    /// Beyond `1 / (4 g dt²)` one step overshoots terminal velocity and the velocity
    /// flips sign, so the body climbs away instead of landing. At or below it the
    /// velocity stays in `(0, v_terminal]`.
    pub fn max_drag_coefficient(gravity: f64) -> f64 {
        1.0 / (4.0 * gravity * TIME_STEP * TIME_STEP)
    }

    pub fn validate(&self) -> SimulationResult<()> {
        let height = self.initial_height_meters;
        if !height.is_finite() || !(0.0..=MAX_HEIGHT_METERS).contains(&height) {
            return Err(SimulationError::ConfigurationError(format!(
                "initial height must be within 0..={} m, got {}",
                MAX_HEIGHT_METERS, height
            )));
        }

        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err(SimulationError::ConfigurationError(format!(
                "gravity must be positive, got {} m/s²",
                self.gravity
            )));
        }

        if !self.drag_coefficient.is_finite() || self.drag_coefficient < 0.0 {
            return Err(SimulationError::ConfigurationError(format!(
                "drag coefficient must be non-negative, got {}",
                self.drag_coefficient
            )));
        }

        let max_drag = Self::max_drag_coefficient(self.gravity);
        if self.drag_coefficient > max_drag {
            return Err(SimulationError::ConfigurationError(format!(
                "drag coefficient {} exceeds {:.3}, the stable limit for {} m/s²",
                self.drag_coefficient, max_drag, self.gravity
            )));
        }

        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig::new(DEFAULT_HEIGHT_METERS, EARTH_GRAVITY, 0.0)
    }
}
