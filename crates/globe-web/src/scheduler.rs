use globe_engine::FrameScheduler;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

/// [`FrameScheduler`] on top of `requestAnimationFrame`.
///
/// One closure is created up front and re-registered every frame, so
/// scheduling never allocates. Handles are the browser's request ids.
pub struct AnimationFrameScheduler {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl AnimationFrameScheduler {
    /// `on_frame` receives the `DOMHighResTimeStamp` (milliseconds) of each frame.
    pub fn new(on_frame: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let callback = Closure::<dyn FnMut(f64)>::new(on_frame);
        Ok(Self { window, callback })
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(id),
            Err(e) => {
                log::warn!("raf: request failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("raf: cancel of {} failed: {:?}", handle, e);
        }
    }
}
