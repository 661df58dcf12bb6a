//! WASM bridge for the globe engine.
//!
//! The runner lives in a `thread_local!` and is driven through free functions,
//! because wasm-bindgen cannot export generic structs directly. The host page
//! calls `globe_init` once with a canvas id, `globe_start` on mount and
//! `globe_stop` (or `globe_dispose`) on unmount; everything else is transport
//! and parameter plumbing for the UI.

pub mod canvas;
pub mod runner;
pub mod scheduler;

use std::cell::RefCell;

use globe_engine::EngineConfig;
use wasm_bindgen::prelude::*;

pub use canvas::CanvasSurface;
pub use runner::{FrameTimer, GlobeRunner};
pub use scheduler::AnimationFrameScheduler;

thread_local! {
    static RUNNER: RefCell<Option<GlobeRunner>> = RefCell::new(None);
}

/// Run `f` against the runner. Returns `None` before init, after dispose, or
/// if the runner is already borrowed further up the stack.
fn with_runner<R>(f: impl FnOnce(&mut GlobeRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.try_borrow_mut().ok()?;
        borrow.as_mut().map(f)
    })
}

fn on_animation_frame(timestamp_ms: f64) {
    with_runner(|r| r.on_frame(timestamp_ms));
}

fn on_window_resize() {
    with_runner(|r| r.fit_canvas());
}

/// Create the runner for the canvas with id `canvas_id`.
/// `config_json` may be empty for defaults.
#[wasm_bindgen]
pub fn globe_init(canvas_id: &str, config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let config = if config_json.trim().is_empty() {
        EngineConfig::default()
    } else {
        EngineConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("Invalid globe config: {e}")))?
    };

    let runner = GlobeRunner::new(canvas_id, &config, on_animation_frame)?;
    // Replacing an old runner drops it, which cancels its pending frame
    let previous = RUNNER.with(|cell| cell.borrow_mut().replace(runner));
    drop(previous);

    log::info!("globe-web: initialized on #{}", canvas_id);
    Ok(())
}

/// Start the render loop (mount).
#[wasm_bindgen]
pub fn globe_start() -> Result<(), JsValue> {
    with_runner(|r| r.start(on_window_resize))
        .unwrap_or_else(|| Err(JsValue::from_str("Globe not initialized. Call globe_init() first.")))
}

/// Stop the render loop (unmount). Safe to call repeatedly.
#[wasm_bindgen]
pub fn globe_stop() {
    with_runner(|r| r.stop());
}

/// Stop and release the runner and its canvas.
#[wasm_bindgen]
pub fn globe_dispose() {
    let runner = RUNNER.with(|cell| cell.borrow_mut().take());
    drop(runner);
}

// ---- Transport ----

#[wasm_bindgen]
pub fn globe_play() {
    with_runner(|r| r.store().borrow_mut().play());
}

#[wasm_bindgen]
pub fn globe_pause() {
    with_runner(|r| r.store().borrow_mut().pause());
}

#[wasm_bindgen]
pub fn globe_toggle() {
    with_runner(|r| r.store().borrow_mut().toggle());
}

#[wasm_bindgen]
pub fn globe_reset() {
    with_runner(|r| r.store().borrow_mut().reset());
}

// ---- Parameters ----

#[wasm_bindgen]
pub fn globe_set_gravity(value: f32) {
    with_runner(|r| r.store().borrow_mut().set_gravity(value));
}

#[wasm_bindgen]
pub fn globe_set_friction(value: f32) {
    with_runner(|r| r.store().borrow_mut().set_friction(value));
}

#[wasm_bindgen]
pub fn globe_set_density(value: f32) {
    with_runner(|r| r.store().borrow_mut().set_density(value));
}

#[wasm_bindgen]
pub fn globe_set_rotation_speed(value: f32) {
    with_runner(|r| r.store().borrow_mut().set_rotation_speed(value));
}

// ---- Readouts ----

#[wasm_bindgen]
pub fn globe_is_running() -> bool {
    with_runner(|r| r.store().borrow().clock().is_running()).unwrap_or(false)
}

#[wasm_bindgen]
pub fn globe_elapsed_seconds() -> f64 {
    with_runner(|r| r.store().borrow().clock().elapsed_seconds()).unwrap_or(0.0)
}

/// Elapsed time as shown in the transport bar, e.g. `"3.25s"`.
#[wasm_bindgen]
pub fn globe_elapsed_display() -> String {
    with_runner(|r| r.store().borrow().clock().display()).unwrap_or_else(|| "0.00s".to_string())
}

#[wasm_bindgen]
pub fn globe_angle() -> f32 {
    with_runner(|r| r.angle()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn globe_is_started() -> bool {
    with_runner(|r| r.is_started()).unwrap_or(false)
}
