use std::f64::consts::TAU;

use glam::Vec2;
use globe_engine::{RadialGradient, Stroke, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// [`Surface`] backed by an HTML canvas 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap an existing canvas element.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("No 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Look up a canvas by element id.
    pub fn from_element_id(id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .ok_or_else(|| JsValue::from_str("No window"))?
            .document()
            .ok_or_else(|| JsValue::from_str("No document"))?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("No element with id '{id}'")))?
            .dyn_into::<HtmlCanvasElement>()?;
        Self::new(canvas)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Size the canvas backing store to its parent's client box.
    /// Returns the new size, or `None` when the canvas is detached from the DOM.
    pub fn fit_to_parent(&self) -> Option<(f64, f64)> {
        let parent = self.canvas.parent_element()?;
        let width = parent.client_width().max(0) as u32;
        let height = parent.client_height().max(0) as u32;
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        Some((width as f64, height as f64))
    }

    fn apply_stroke(&self, stroke: &Stroke) {
        self.ctx.set_stroke_style_str(&stroke.color.to_string());
        self.ctx.set_line_width(stroke.width as f64);
    }

    fn circle_path(&self, center: Vec2, radius: f32) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU)
    }
}

impl Surface for CanvasSurface {
    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn clear(&mut self, width: u32, height: u32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_gradient_circle(&mut self, center: Vec2, radius: f32, gradient: &RadialGradient) {
        let fill = match self.ctx.create_radial_gradient(
            gradient.focus.x as f64,
            gradient.focus.y as f64,
            gradient.focus_radius as f64,
            gradient.center.x as f64,
            gradient.center.y as f64,
            gradient.radius as f64,
        ) {
            Ok(g) => g,
            Err(e) => {
                log::debug!("canvas: radial gradient rejected: {:?}", e);
                return;
            }
        };
        for stop in &gradient.stops {
            if let Err(e) = fill.add_color_stop(stop.offset, &stop.color.to_string()) {
                log::debug!("canvas: color stop rejected: {:?}", e);
            }
        }
        self.ctx.set_fill_style_canvas_gradient(&fill);
        if self.circle_path(center, radius).is_ok() {
            self.ctx.fill();
        }
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: &Stroke) {
        self.apply_stroke(stroke);
        if self.circle_path(center, radius).is_ok() {
            self.ctx.stroke();
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        self.apply_stroke(stroke);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}
