pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use constants::*;
pub use control::config::SimulationConfig;
pub use control::driver::{
    drive_simulated, Clock, IntervalDriver, ManualClock, SystemClock, TickDriver,
};
pub use control::engine::{FreefallEngine, Phase, SimulationState, TickOutcome};
pub use control::environment::{Atmosphere, CelestialBody};
pub use errors::{SimulationError, SimulationResult};

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::Aerodynamics;
pub use trajectory_system::kinematics::Kinematics;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::{Frame, SimulationObserver, Telemetry};

// Re-export commonly used utilities
pub use utils::canvas::CanvasScale;
