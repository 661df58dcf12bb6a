use std::f32::consts::TAU;

/// Radians advanced per tick for each unit of rotation speed.
/// Rotation is frame-coupled: visual speed follows the display refresh rate.
pub const ANGLE_GAIN: f32 = 0.02;

/// Rotation of the globe, owned by the render loop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    /// Current angle in radians, always in [0, 2π).
    angle: f32,
    /// Radians per tick derived from the last rotation speed read.
    angular_velocity: f32,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary angle (wrapped into [0, 2π)).
    pub fn with_angle(angle: f32) -> Self {
        Self {
            angle: wrap_angle(angle),
            angular_velocity: 0.0,
        }
    }

    /// Advance by one tick at `rotation_speed`.
    /// A non-finite speed counts as zero so the angle never turns NaN.
    pub fn advance(&mut self, rotation_speed: f32) {
        let speed = if rotation_speed.is_finite() { rotation_speed } else { 0.0 };
        self.angular_velocity = speed * ANGLE_GAIN;
        self.angle = wrap_angle(self.angle + self.angular_velocity);
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }
}

/// Wrap an angle into [0, 2π).
pub fn wrap_angle(angle: f32) -> f32 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}
