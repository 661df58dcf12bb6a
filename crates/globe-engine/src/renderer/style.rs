//! Fixed look of the globe: shading gradient, grid stroke, ring and spoke layout.

use std::fmt;

/// Straight-alpha colour with 8-bit channels and a 0.0-1.0 alpha.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// CSS colour syntax, e.g. `rgba(59, 130, 246, 0.8)`.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// One stop of a radial gradient. `offset` runs from 0.0 (inner circle) to 1.0 (edge).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Stroke parameters for grid lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f32,
}

/// Design constants for the globe. Not user-tunable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereStyle {
    /// Shading from the highlight outwards.
    pub gradient: [GradientStop; 3],
    /// Highlight position relative to the center, in units of radius (both axes).
    pub highlight_offset: f32,
    /// Latitude ring indices, inclusive (`-2..=2` gives 5 rings).
    pub ring_min: i32,
    pub ring_max: i32,
    /// Vertical distance between rings, in units of radius.
    pub ring_spacing: f32,
    /// Number of longitude spokes.
    pub spoke_count: u32,
    /// Stroke used for rings and spokes.
    pub grid_stroke: Stroke,
}

pub const DEFAULT_STYLE: SphereStyle = SphereStyle {
    gradient: [
        GradientStop { offset: 0.0, color: Rgba::new(59, 130, 246, 0.8) },
        GradientStop { offset: 0.5, color: Rgba::new(37, 99, 235, 0.6) },
        GradientStop { offset: 1.0, color: Rgba::new(29, 78, 216, 0.4) },
    ],
    highlight_offset: -0.3,
    ring_min: -2,
    ring_max: 2,
    ring_spacing: 0.3,
    spoke_count: 8,
    grid_stroke: Stroke {
        color: Rgba::new(255, 255, 255, 0.1),
        width: 1.0,
    },
};

impl SphereStyle {
    /// Number of latitude rings the style asks for (before degenerate ones are skipped).
    pub fn ring_count(&self) -> usize {
        (self.ring_max - self.ring_min + 1).max(0) as usize
    }
}

impl Default for SphereStyle {
    fn default() -> Self {
        DEFAULT_STYLE
    }
}
