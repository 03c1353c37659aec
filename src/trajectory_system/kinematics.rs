use super::aerodynamics::Aerodynamics;

/// One-dimensional fall. `position` is height above the ground, `velocity` is
/// positive downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kinematics {
    pub position: f64,
    pub velocity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepResult {
    pub drag_force: f64,
    pub grounded: bool,
}

impl Kinematics {
    pub fn dropped_from(height: f64) -> Self {
        Kinematics {
            position: height,
            velocity: 0.0,
        }
    }

    /// Explicit Euler step. Velocity is updated first and the new velocity moves the
    /// body; drag is evaluated on the velocity entering the step.
    pub fn update(
        &mut self,
        delta_time: f64,
        gravity: f64,
        aerodynamics: &Aerodynamics,
    ) -> StepResult {
        let drag_force = aerodynamics.calculate_drag(self.velocity);
        let net_acceleration = gravity - drag_force;

        self.velocity += net_acceleration * delta_time;
        self.position -= self.velocity * delta_time;

        let grounded = self.position <= 0.0;
        if grounded {
            self.position = 0.0;
        }

        StepResult {
            drag_force,
            grounded,
        }
    }

    pub fn reset(&mut self) {
        *self = Kinematics::default();
    }
}
