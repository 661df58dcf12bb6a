use std::rc::Rc;

use globe_engine::{EngineConfig, RenderLoop, SharedStore};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::canvas::CanvasSurface;
use crate::scheduler::AnimationFrameScheduler;

/// Turns `requestAnimationFrame` timestamps into frame deltas.
#[derive(Debug, Default)]
pub struct FrameTimer {
    last_ms: Option<f64>,
}

impl FrameTimer {
    /// Seconds since the previous timestamp. The first frame after a reset is 0,
    /// and timestamps that run backwards count as 0.
    pub fn delta_seconds(&mut self, timestamp_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) if timestamp_ms.is_finite() => ((timestamp_ms - last) / 1000.0).max(0.0),
            _ => 0.0,
        };
        if timestamp_ms.is_finite() {
            self.last_ms = Some(timestamp_ms);
        }
        dt
    }

    /// Forget the last timestamp so time spent stopped is not counted.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Browser host for the globe render loop.
///
/// Lives in a `thread_local!` in `lib.rs`; the animation frame and resize
/// closures call back into it through the exported free functions.
pub struct GlobeRunner {
    render_loop: RenderLoop<CanvasSurface, AnimationFrameScheduler>,
    store: SharedStore,
    timer: FrameTimer,
    resize_listener: Option<Closure<dyn FnMut()>>,
}

impl GlobeRunner {
    /// Build a stopped runner for the canvas with id `canvas_id`.
    ///
    /// `on_frame` must route back into this runner; the resize callback is
    /// supplied later to [`start`](Self::start).
    pub fn new(
        canvas_id: &str,
        config: &EngineConfig,
        on_frame: impl FnMut(f64) + 'static,
    ) -> Result<Self, JsValue> {
        let surface = CanvasSurface::from_element_id(canvas_id)?;
        let scheduler = AnimationFrameScheduler::new(on_frame)?;
        let store = config.build_store().shared();
        let render_loop = RenderLoop::with_surface(Rc::clone(&store), scheduler, surface);
        Ok(Self {
            render_loop,
            store,
            timer: FrameTimer::default(),
            resize_listener: None,
        })
    }

    /// Fit the canvas, install the resize listener and start ticking.
    pub fn start(&mut self, on_resize: impl FnMut() + 'static) -> Result<(), JsValue> {
        self.fit_canvas();
        if self.resize_listener.is_none() {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
            let listener = Closure::<dyn FnMut()>::new(on_resize);
            window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref())?;
            self.resize_listener = Some(listener);
        }
        self.timer.reset();
        self.render_loop.start();
        Ok(())
    }

    /// Cancel the pending frame and remove the resize listener.
    pub fn stop(&mut self) {
        self.render_loop.stop();
        self.timer.reset();
        if let Some(listener) = self.resize_listener.take() {
            if let Some(window) = web_sys::window() {
                let _ = window
                    .remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
            }
        }
    }

    /// Animation frame callback.
    pub fn on_frame(&mut self, timestamp_ms: f64) {
        let dt = self.timer.delta_seconds(timestamp_ms);
        self.render_loop.tick(dt);
    }

    /// Window resize callback.
    pub fn fit_canvas(&mut self) {
        let size = self
            .render_loop
            .surface()
            .and_then(|surface| surface.fit_to_parent());
        match size {
            Some((width, height)) => self.render_loop.resize(width, height),
            None => log::debug!("globe-web: canvas has no parent; keeping current layout"),
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn angle(&self) -> f32 {
        self.render_loop.angle()
    }

    pub fn is_started(&self) -> bool {
        self.render_loop.is_started()
    }
}

impl Drop for GlobeRunner {
    fn drop(&mut self) {
        self.stop();
    }
}
