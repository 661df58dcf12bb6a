//! Headless render loop for a rotating, shaded globe.
//!
//! The engine reads transport and parameter state from a shared store once per
//! tick, advances the rotation, projects the globe into draw commands and
//! replays them into whatever [`Surface`] the host provides. Frame timing is
//! the host's job, behind the [`FrameScheduler`] seam.

pub mod api;
pub mod core;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use crate::api::config::EngineConfig;
pub use crate::api::render_loop::{FrameStats, RenderLoop};
pub use crate::core::params::SimParams;
pub use crate::core::rotation::{RotationState, ANGLE_GAIN};
pub use crate::core::schedule::{FrameScheduler, ManualScheduler};
pub use crate::core::store::{FrameInputs, ParameterStore, SharedStore};
pub use crate::core::time::SimulationClock;
pub use crate::renderer::projector::{project_sphere, DrawCommand, LatitudeRing, RadialGradient};
pub use crate::renderer::style::{GradientStop, Rgba, SphereStyle, Stroke, DEFAULT_STYLE};
pub use crate::renderer::surface::{paint, RecordingSurface, Surface, SurfaceCall};
pub use crate::renderer::viewport::ViewportGeometry;
