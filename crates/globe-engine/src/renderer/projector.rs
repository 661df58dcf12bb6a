//! Pure projection of the globe into 2D drawing primitives.
//!
//! Given the same viewport, style and angle, [`project_sphere`] always returns
//! the same command list: one shaded disc, then latitude rings, then spokes.

use std::f32::consts::TAU;

use glam::Vec2;

use super::style::{GradientStop, SphereStyle, Stroke};
use super::viewport::ViewportGeometry;
use crate::core::rotation::wrap_angle;

/// Two-circle radial gradient, as understood by canvas-style backends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialGradient {
    /// Center of the inner (highlight) circle.
    pub focus: Vec2,
    /// Radius of the inner circle.
    pub focus_radius: f32,
    /// Center of the outer circle.
    pub center: Vec2,
    /// Radius of the outer circle.
    pub radius: f32,
    pub stops: [GradientStop; 3],
}

/// One drawing primitive. Backends replay these in order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Filled circle shaded with a radial gradient.
    FillGradientCircle {
        center: Vec2,
        radius: f32,
        gradient: RadialGradient,
    },
    /// Circle outline.
    StrokeCircle {
        center: Vec2,
        radius: f32,
        stroke: Stroke,
    },
    /// Straight line segment.
    StrokeLine { from: Vec2, to: Vec2, stroke: Stroke },
}

/// A circle of latitude at `offset` pixels from the equator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatitudeRing {
    pub index: i32,
    pub offset: f32,
    pub radius: f32,
}

/// Shading gradient for a globe laid out in `viewport`.
pub fn shading_gradient(viewport: &ViewportGeometry, style: &SphereStyle) -> RadialGradient {
    let shift = viewport.radius * style.highlight_offset;
    RadialGradient {
        focus: viewport.center + Vec2::splat(shift),
        focus_radius: 0.0,
        center: viewport.center,
        radius: viewport.radius,
        stops: style.gradient,
    }
}

/// Latitude rings for a silhouette of `radius` pixels.
///
/// Ring `i` sits `i * radius * spacing` from the equator and has the chord
/// half-length at that height as its radius. Rings past the poles are skipped.
pub fn latitude_rings(radius: f32, style: &SphereStyle) -> Vec<LatitudeRing> {
    if !(radius.is_finite() && radius > 0.0) {
        return Vec::new();
    }
    let mut rings = Vec::with_capacity(style.ring_count());
    for index in style.ring_min..=style.ring_max {
        let offset = index as f32 * radius * style.ring_spacing;
        let r_sq = radius * radius - offset * offset;
        if r_sq < 0.0 {
            continue;
        }
        rings.push(LatitudeRing {
            index,
            offset,
            radius: r_sq.sqrt(),
        });
    }
    rings
}

/// Directions (radians, in [0, 2π)) of `count` evenly spaced spokes rotated by `angle`.
pub fn spoke_angles(angle: f32, count: u32) -> Vec<f32> {
    if count == 0 {
        return Vec::new();
    }
    let step = TAU / count as f32;
    (0..count)
        .map(|k| wrap_angle(angle + k as f32 * step))
        .collect()
}

/// Project the globe at rotation `angle` into drawing primitives.
pub fn project_sphere(
    viewport: &ViewportGeometry,
    style: &SphereStyle,
    angle: f32,
) -> Vec<DrawCommand> {
    let rings = latitude_rings(viewport.radius, style);
    let spokes = spoke_angles(angle, style.spoke_count);
    let mut commands = Vec::with_capacity(1 + rings.len() + spokes.len());

    commands.push(DrawCommand::FillGradientCircle {
        center: viewport.center,
        radius: viewport.radius,
        gradient: shading_gradient(viewport, style),
    });

    // Rings are concentric with the silhouette; their radius encodes the latitude.
    for ring in &rings {
        commands.push(DrawCommand::StrokeCircle {
            center: viewport.center,
            radius: ring.radius,
            stroke: style.grid_stroke,
        });
    }

    for a in spokes {
        let (sin, cos) = a.sin_cos();
        commands.push(DrawCommand::StrokeLine {
            from: viewport.center,
            to: viewport.center + Vec2::new(cos, sin) * viewport.radius,
            stroke: style.grid_stroke,
        });
    }

    commands
}
