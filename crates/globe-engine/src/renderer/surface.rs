//! Drawable surface contract.
//!
//! The engine never touches pixels itself. Each backend (canvas 2D in the
//! browser, a software rasterizer, a recording double) implements [`Surface`]
//! and the render loop replays projected [`DrawCommand`]s into it.

use glam::Vec2;

use super::projector::{DrawCommand, RadialGradient};
use super::style::Stroke;

/// A 2D pixel-addressable drawing target.
///
/// # Example Implementation
///
/// ```ignore
/// struct SkiaSurface {
///     canvas: skia::Canvas,
/// }
///
/// impl Surface for SkiaSurface {
///     fn backend(&self) -> &'static str { "skia" }
///     fn size(&self) -> (u32, u32) { (self.canvas.width(), self.canvas.height()) }
///     fn clear(&mut self, width: u32, height: u32) { /* ... */ }
///     // ...
/// }
/// ```
pub trait Surface {
    /// Backend identifier (e.g., "canvas2d", "recording").
    fn backend(&self) -> &'static str;

    /// Current pixel dimensions. A zero dimension means nothing can be drawn.
    fn size(&self) -> (u32, u32);

    /// Clear the rectangle from the origin to (`width`, `height`).
    fn clear(&mut self, width: u32, height: u32);

    /// Fill a circle with a radial gradient.
    fn fill_gradient_circle(&mut self, center: Vec2, radius: f32, gradient: &RadialGradient);

    /// Outline a circle.
    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke);

    /// Draw a line segment.
    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke);
}

/// Clear the whole surface at its current size, then replay `commands` in order.
pub fn paint<S: Surface + ?Sized>(surface: &mut S, commands: &[DrawCommand]) {
    let (width, height) = surface.size();
    surface.clear(width, height);
    for cmd in commands {
        match cmd {
            DrawCommand::FillGradientCircle { center, radius, gradient } => {
                surface.fill_gradient_circle(*center, *radius, gradient);
            }
            DrawCommand::StrokeCircle { center, radius, stroke } => {
                surface.stroke_circle(*center, *radius, stroke);
            }
            DrawCommand::StrokeLine { from, to, stroke } => {
                surface.stroke_line(*from, *to, stroke);
            }
        }
    }
}

/// One call observed by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Clear { width: u32, height: u32 },
    Draw(DrawCommand),
}

/// Surface that records every call instead of drawing.
/// Used by headless hosts and tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    /// Change the reported size (the host's resize event is separate).
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Drain recorded calls.
    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of full clears recorded, i.e. frames painted.
    pub fn frame_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Clear { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn backend(&self) -> &'static str {
        "recording"
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, width: u32, height: u32) {
        self.calls.push(SurfaceCall::Clear { width, height });
    }

    fn fill_gradient_circle(&mut self, center: Vec2, radius: f32, gradient: &RadialGradient) {
        self.calls.push(SurfaceCall::Draw(DrawCommand::FillGradientCircle {
            center,
            radius,
            gradient: *gradient,
        }));
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.calls.push(SurfaceCall::Draw(DrawCommand::StrokeCircle {
            center,
            radius,
            stroke: *stroke,
        }));
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.calls.push(SurfaceCall::Draw(DrawCommand::StrokeLine {
            from,
            to,
            stroke: *stroke,
        }));
    }
}
