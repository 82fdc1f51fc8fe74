//! WASM bindings for the pixel transforms.
//!
//! Each binding returns a new image and leaves its input untouched. Commit
//! or preview the result through `JsEditSession`.

use retouch_core::transform::{self, FlipMode};
use wasm_bindgen::prelude::*;

use crate::types::{to_js_error, JsImageBuffer};

/// Convert to BT.601 luma, kept as three equal channels.
#[wasm_bindgen]
pub fn grayscale(image: &JsImageBuffer) -> JsImageBuffer {
    JsImageBuffer::from_core(transform::grayscale(image.as_core()))
}

/// Gaussian blur. Even intensities use the next odd kernel size.
/// Throws if the kernel would be larger than 255.
#[wasm_bindgen]
pub fn blur(image: &JsImageBuffer, intensity: i32) -> Result<JsImageBuffer, JsValue> {
    transform::blur(image.as_core(), intensity)
        .map(JsImageBuffer::from_core)
        .map_err(to_js_error)
}

/// Canny edges, white on black. `threshold` is clamped to 10-150.
#[wasm_bindgen]
pub fn edge_detect(image: &JsImageBuffer, threshold: i32) -> JsImageBuffer {
    JsImageBuffer::from_core(transform::edge_detect(image.as_core(), threshold))
}

/// Add `beta` (clamped to -100..=100) to every channel.
#[wasm_bindgen]
pub fn brightness(image: &JsImageBuffer, beta: i32) -> JsImageBuffer {
    JsImageBuffer::from_core(transform::brightness(image.as_core(), beta))
}

/// Throws if `alpha` is NaN or infinite.
#[wasm_bindgen]
pub fn contrast(image: &JsImageBuffer, alpha: f64) -> Result<JsImageBuffer, JsValue> {
    transform::contrast(image.as_core(), alpha)
        .map(JsImageBuffer::from_core)
        .map_err(to_js_error)
}

/// Rotate clockwise by a multiple of 90 degrees.
#[wasm_bindgen]
pub fn rotate(image: &JsImageBuffer, degrees: i32) -> JsImageBuffer {
    JsImageBuffer::from_core(transform::rotate(image.as_core(), degrees))
}

/// Mirror along `"horizontal"` or `"vertical"`. Throws for anything else.
#[wasm_bindgen]
pub fn flip(image: &JsImageBuffer, mode: &str) -> Result<JsImageBuffer, JsValue> {
    let mode: FlipMode = mode.parse().map_err(to_js_error)?;
    Ok(JsImageBuffer::from_core(transform::flip(
        image.as_core(),
        mode,
    )))
}

/// Scale both axes by `percent` (clamped to 10-200).
#[wasm_bindgen]
pub fn resize_scale(image: &JsImageBuffer, percent: i32) -> JsImageBuffer {
    JsImageBuffer::from_core(transform::resize_scale(image.as_core(), percent))
}
