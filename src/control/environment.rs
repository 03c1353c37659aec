use std::fmt;

use crate::constants::{
    AIR_DRAG_COEFFICIENT, EARTH_GRAVITY, JUPITER_GRAVITY, MARS_GRAVITY, MOON_GRAVITY,
    VACUUM_DRAG_COEFFICIENT,
};

/// Gravity presets offered next to the custom gravity field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CelestialBody {
    Earth,
    Moon,
    Mars,
    Jupiter,
}

impl CelestialBody {
    pub const ALL: [CelestialBody; 4] = [
        CelestialBody::Earth,
        CelestialBody::Moon,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
    ];

    pub fn surface_gravity(&self) -> f64 {
        match self {
            CelestialBody::Earth => EARTH_GRAVITY,
            CelestialBody::Moon => MOON_GRAVITY,
            CelestialBody::Mars => MARS_GRAVITY,
            CelestialBody::Jupiter => JUPITER_GRAVITY,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CelestialBody::Earth => "Earth",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
        }
    }

    /// Case-insensitive lookup by name, as typed on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|body| body.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} m/s²)", self.name(), self.surface_gravity())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Atmosphere {
    #[default]
    Vacuum,
    Air,
}

impl Atmosphere {
    pub fn drag_coefficient(&self) -> f64 {
        match self {
            Atmosphere::Vacuum => VACUUM_DRAG_COEFFICIENT,
            Atmosphere::Air => AIR_DRAG_COEFFICIENT,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "vacuum" => Some(Atmosphere::Vacuum),
            "air" => Some(Atmosphere::Air),
            _ => None,
        }
    }
}
