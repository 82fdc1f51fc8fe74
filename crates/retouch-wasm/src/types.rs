//! WASM-compatible wrapper types for image data.
//!
//! `JsImageBuffer` wraps a validated core [`ImageBuffer`], so every buffer
//! that reaches a binding already has consistent dimensions.

use std::fmt::Display;

use retouch_core::{EditError, ImageBuffer, CHANNELS};
use wasm_bindgen::prelude::*;

/// An 8-bit BGR image for JavaScript.
///
/// # Memory Management
///
/// The pixel data lives in WASM memory. `pixels()` and `rgba_pixels()` copy
/// it into a fresh `Uint8Array`. Call `free()` to release a large image
/// early; otherwise the finalizer does it.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsImageBuffer {
    inner: ImageBuffer,
}

#[wasm_bindgen]
impl JsImageBuffer {
    /// Wrap BGR pixel data (3 bytes per pixel, row-major).
    ///
    /// Throws if a dimension is zero or the length is not
    /// `width * height * 3`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsImageBuffer, JsValue> {
        Self::try_new(width, height, pixels).map_err(to_js_error)
    }

    /// Width in pixels.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Height in pixels.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_len()
    }

    /// Returns BGR pixel data as a Uint8Array copy.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Returns RGBA pixel data ready for `new ImageData(...)`.
    ///
    /// Channels are reordered and alpha is fully opaque.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.inner.pixel_count() * 4);
        for bgr in self.inner.pixels().chunks_exact(CHANNELS) {
            rgba.extend_from_slice(&[bgr[2], bgr[1], bgr[0], 255]);
        }
        rgba
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsImageBuffer {
    pub(crate) fn try_new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EditError> {
        ImageBuffer::new(width, height, pixels).map(Self::from_core)
    }

    pub(crate) fn from_core(inner: ImageBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &ImageBuffer {
        &self.inner
    }

    pub(crate) fn to_core(&self) -> ImageBuffer {
        self.inner.clone()
    }
}

/// Convert a core error into a JavaScript exception value.
pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
