//! Browser bridge for the grove scene.
//!
//! The page calls `grove_init` once, then drives `grove_tick` from its
//! `requestAnimationFrame` loop and reads shapes straight out of wasm memory.

pub mod runner;

pub use runner::SceneRunner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                log::warn!("grove: not initialized, call grove_init() first");
                None
            }
        }
    })
}

/// Width birds fly across: the window's inner width, or the container's
/// width when the window reports none. Fails if the container is missing.
fn scene_width(container_id: &str) -> Result<f32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("grove: no window available"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("grove: no document available"))?;
    let container = document.get_element_by_id(container_id).ok_or_else(|| {
        JsValue::from_str(&format!("grove: container element '#{}' not found", container_id))
    })?;
    let inner = window.inner_width().ok().and_then(|w| w.as_f64());
    Ok(runner::exit_width(inner, container.client_width()))
}

/// Set up the scene for the container `#container_id`. `config_json` may be
/// empty for defaults. Does not start the scene.
#[wasm_bindgen]
pub fn grove_init(container_id: &str, config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let width = scene_width(container_id)?;
    let config = runner::load_config(config_json, width)
        .map_err(|e| JsValue::from_str(&format!("grove: {}", e)))?;
    let seed = (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64;
    let runner = SceneRunner::new(config, seed)
        .map_err(|e| JsValue::from_str(&format!("grove: {}", e)))?;

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("grove: initialized on #{} ({}px)", container_id, width);
    Ok(())
}

#[wasm_bindgen]
pub fn grove_start() {
    with_runner(|r| r.start());
}

#[wasm_bindgen]
pub fn grove_clear() {
    with_runner(|r| r.clear());
}

#[wasm_bindgen]
pub fn grove_tick(dt_ms: f32) {
    with_runner(|r| r.tick(dt_ms));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_header_ptr() -> *const f32 {
    with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.max_instances()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn get_instance_floats() -> u32 {
    grove_engine::ShapeInstance::FLOATS as u32
}

#[wasm_bindgen]
pub fn get_viewport_width() -> f32 {
    with_runner(|r| r.viewport_width()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn get_pending_callbacks() -> u32 {
    with_runner(|r| r.pending_callbacks()).unwrap_or(0)
}
