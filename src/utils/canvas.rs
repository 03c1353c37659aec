use crate::constants::{
    BALL_RADIUS, DEFAULT_CANVAS_SIZE, GRAB_TOLERANCE, GROUND_MARGIN, MAX_HEIGHT_METERS,
};

/// Maps heights in meters onto a square canvas whose bottom edge is the ground and
/// whose top edge is `max_meters`. Canvas y grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasScale {
    pub canvas_size: f64,
    pub max_meters: f64,
}

impl CanvasScale {
    pub fn new(canvas_size: f64, max_meters: f64) -> Self {
        CanvasScale {
            canvas_size,
            max_meters,
        }
    }

    pub fn pixels_per_meter(&self) -> f64 {
        self.canvas_size / self.max_meters
    }

    pub fn height_to_y(&self, height: f64) -> f64 {
        self.canvas_size - height * self.pixels_per_meter()
    }

    /// Height selected by dragging the ball to `y`. Pointer positions outside the
    /// canvas pin to the nearest edge.
    pub fn y_to_height(&self, y: f64) -> f64 {
        let y = y.clamp(0.0, self.canvas_size);
        let height = (self.canvas_size - y) * (self.max_meters / self.canvas_size);
        self.clamp_height(height)
    }

    pub fn clamp_height(&self, height: f64) -> f64 {
        height.clamp(0.0, self.max_meters)
    }

    /// Where to draw a falling ball; keeps it above the ground line.
    pub fn ball_y(&self, position: f64) -> f64 {
        self.height_to_y(position).min(self.canvas_size - GROUND_MARGIN)
    }

    /// Keeps the whole ball sprite on the canvas.
    pub fn sprite_y(&self, y: f64) -> f64 {
        y.clamp(BALL_RADIUS, self.canvas_size - BALL_RADIUS)
    }

    /// Whether a pointer at `(x, y)` grabs the ball centred horizontally at `ball_y`.
    pub fn hits_ball(&self, x: f64, y: f64, ball_y: f64) -> bool {
        (x - self.canvas_size / 2.0).abs() < GRAB_TOLERANCE && (y - ball_y).abs() < GRAB_TOLERANCE
    }
}

impl Default for CanvasScale {
    fn default() -> Self {
        CanvasScale::new(DEFAULT_CANVAS_SIZE, MAX_HEIGHT_METERS)
    }
}
