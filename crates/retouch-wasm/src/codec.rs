//! Decoding and encoding bindings.
//!
//! ```typescript
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const png = encode_png(session.current());
//! const jpeg = encode_jpeg(session.current(), 90);
//! ```

use retouch_core::codec::{self, CodecError, OutputFormat};
use wasm_bindgen::prelude::*;

use crate::types::{to_js_error, JsImageBuffer};

/// Decode JPEG, PNG or BMP bytes. EXIF orientation is applied.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsImageBuffer, JsValue> {
    decode(bytes).map_err(to_js_error)
}

/// Encode as PNG.
#[wasm_bindgen]
pub fn encode_png(image: &JsImageBuffer) -> Result<Vec<u8>, JsValue> {
    encode(image, OutputFormat::Png).map_err(to_js_error)
}

/// Encode as JPEG. `quality` is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsImageBuffer, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode(image, OutputFormat::Jpeg { quality }).map_err(to_js_error)
}

fn decode(bytes: &[u8]) -> Result<JsImageBuffer, CodecError> {
    codec::decode_bytes(bytes).map(JsImageBuffer::from_core)
}

fn encode(image: &JsImageBuffer, format: OutputFormat) -> Result<Vec<u8>, CodecError> {
    codec::encode_bytes(image.as_core(), format)
}
