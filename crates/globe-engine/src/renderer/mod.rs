pub mod projector;
pub mod style;
pub mod surface;
pub mod viewport;

// Re-export key types for convenient access
pub use projector::{DrawCommand, LatitudeRing, RadialGradient, project_sphere};
pub use style::{GradientStop, Rgba, SphereStyle, Stroke, DEFAULT_STYLE};
pub use surface::{paint, RecordingSurface, Surface, SurfaceCall};
pub use viewport::ViewportGeometry;
