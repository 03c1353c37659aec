// Physical Constants
pub const EARTH_GRAVITY: f64 = 9.8; // m/s²
pub const MOON_GRAVITY: f64 = 1.62; // m/s²
pub const MARS_GRAVITY: f64 = 3.71; // m/s²
pub const JUPITER_GRAVITY: f64 = 24.79; // m/s²

// Drag Constants
pub const AIR_DRAG_COEFFICIENT: f64 = 0.1; // smooth sphere
pub const VACUUM_DRAG_COEFFICIENT: f64 = 0.0;

// Height Limits
pub const MAX_HEIGHT_METERS: f64 = 30.48; // 100 ft
pub const DEFAULT_HEIGHT_METERS: f64 = 15.0; // ~50 ft

// Simulation Parameters
pub const TICK_INTERVAL_MS: u64 = 50; // 20 Hz
pub const TIME_STEP: f64 = 0.05; // s
pub const MAX_TICKS: usize = 10_000;

// Canvas Constants
pub const DEFAULT_CANVAS_SIZE: f64 = 300.0; // px
pub const BALL_RADIUS: f64 = 10.0; // px
pub const GROUND_MARGIN: f64 = 10.0; // px
pub const GRAB_TOLERANCE: f64 = 15.0; // px
