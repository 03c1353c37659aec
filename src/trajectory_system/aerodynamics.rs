#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aerodynamics {
    pub drag_coefficient: f64,
}

impl Aerodynamics {
    pub fn new(drag_coefficient: f64) -> Self {
        Aerodynamics { drag_coefficient }
    }

    /// Resistive deceleration `k * v²`, in m/s². Not a real aerodynamic drag model:
    /// there is no density, area or mass term, and the sign of `v` is ignored.
    pub fn calculate_drag(&self, velocity: f64) -> f64 {
        self.drag_coefficient * velocity * velocity
    }

    pub fn net_acceleration(&self, gravity: f64, velocity: f64) -> f64 {
        gravity - self.calculate_drag(velocity)
    }

    /// Speed at which drag cancels gravity, or `None` in vacuum.
    pub fn terminal_velocity(&self, gravity: f64) -> Option<f64> {
        if self.drag_coefficient > 0.0 {
            Some((gravity / self.drag_coefficient).sqrt())
        } else {
            None
        }
    }
}
