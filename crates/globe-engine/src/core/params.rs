use serde::{Deserialize, Serialize};

/// Slider ranges exposed by the parameter panel.
pub const GRAVITY_RANGE: (f32, f32) = (0.0, 20.0);
pub const FRICTION_RANGE: (f32, f32) = (0.0, 1.0);
pub const DENSITY_RANGE: (f32, f32) = (0.0, 10.0);
pub const ROTATION_SPEED_RANGE: (f32, f32) = (0.0, 2.0);

/// User-adjustable simulation parameters.
///
/// Only `rotation_speed` drives the render loop. Gravity, friction and density
/// are carried for the host UI and never interpreted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Gravitational acceleration in m/s² (default: 9.81).
    pub gravity: f32,
    /// Friction coefficient (default: 0.5).
    pub friction: f32,
    /// Density in g/cm³ (default: 1.0).
    pub density: f32,
    /// Rotation speed scalar in [0, 2] (default: 0.5).
    pub rotation_speed: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            friction: 0.5,
            density: 1.0,
            rotation_speed: 0.5,
        }
    }
}

/// Clamp finite values into `range`; non-finite values pass through untouched
/// and are dealt with by whoever reads them.
fn clamp_finite(value: f32, range: (f32, f32)) -> f32 {
    if value.is_finite() {
        value.clamp(range.0, range.1)
    } else {
        value
    }
}

impl SimParams {
    pub fn set_gravity(&mut self, value: f32) {
        self.gravity = clamp_finite(value, GRAVITY_RANGE);
    }

    pub fn set_friction(&mut self, value: f32) {
        self.friction = clamp_finite(value, FRICTION_RANGE);
    }

    pub fn set_density(&mut self, value: f32) {
        self.density = clamp_finite(value, DENSITY_RANGE);
    }

    pub fn set_rotation_speed(&mut self, value: f32) {
        self.rotation_speed = clamp_finite(value, ROTATION_SPEED_RANGE);
    }

    /// Copy of `self` with every finite field pulled into its slider range.
    pub fn clamped(mut self) -> Self {
        self.set_gravity(self.gravity);
        self.set_friction(self.friction);
        self.set_density(self.density);
        self.set_rotation_speed(self.rotation_speed);
        self
    }
}
