use std::cell::RefCell;
use std::rc::Rc;

use super::params::SimParams;
use super::time::SimulationClock;

/// Store handle shared between the host UI and the render loop.
/// Single-threaded; borrows never outlive a single call.
pub type SharedStore = Rc<RefCell<ParameterStore>>;

/// Per-tick copy of everything the render loop reads from the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInputs {
    pub running: bool,
    pub rotation_speed: f32,
    pub gravity: f32,
    pub friction: f32,
    pub density: f32,
}

/// Transport state plus live parameter values.
///
/// The UI writes through the setters; the render loop takes one
/// [`FrameInputs`] snapshot per tick and advances the clock while running.
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    clock: SimulationClock,
    params: SimParams,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `params` (clamped into slider ranges).
    pub fn with_params(params: SimParams) -> Self {
        Self {
            clock: SimulationClock::new(),
            params: params.clamped(),
        }
    }

    /// Wrap the store for sharing with a render loop.
    pub fn shared(self) -> SharedStore {
        Rc::new(RefCell::new(self))
    }

    pub fn snapshot(&self) -> FrameInputs {
        FrameInputs {
            running: self.clock.is_running(),
            rotation_speed: self.params.rotation_speed,
            gravity: self.params.gravity,
            friction: self.params.friction,
            density: self.params.density,
        }
    }

    // -- Transport --

    pub fn play(&mut self) {
        self.clock.play();
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn toggle(&mut self) {
        self.clock.toggle();
    }

    /// Zero the clock and stop. The rotation angle is owned by the render loop
    /// and is left where it is.
    pub fn reset(&mut self) {
        self.clock.reset();
    }

    /// Advance simulated time by one frame's worth. Called by the render loop.
    pub fn advance_clock(&mut self, dt: f64) {
        self.clock.advance(dt);
    }

    // -- Parameters --

    pub fn set_gravity(&mut self, value: f32) {
        self.params.set_gravity(value);
    }

    pub fn set_friction(&mut self, value: f32) {
        self.params.set_friction(value);
    }

    pub fn set_density(&mut self, value: f32) {
        self.params.set_density(value);
    }

    pub fn set_rotation_speed(&mut self, value: f32) {
        self.params.set_rotation_speed(value);
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }
}
