//! Global timing bindings.
//!
//! Bound directly instead of through `web_sys::Window` so callbacks do not have to fetch the
//! window on every frame or timer tick.

use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    pub(crate) fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    pub(crate) fn cancel_animation_frame(id: i32);

    #[wasm_bindgen(js_name = "setTimeout")]
    pub(crate) fn set_timeout(callback: &JsValue, delay_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    pub(crate) fn clear_timeout(id: i32);
}

/// Milliseconds since the time origin, truncated.
pub(crate) fn now_ms() -> u64 {
    // Float-to-int casts saturate; negative and NaN become 0.
    performance_now() as u64
}

/// Delay to pass to `setTimeout` for a task due at `due_ms`.
pub(crate) fn delay_until(due_ms: u64, now_ms: u64) -> i32 {
    i32::try_from(due_ms.saturating_sub(now_ms)).unwrap_or(i32::MAX)
}
