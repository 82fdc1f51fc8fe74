//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core edit session, live preview, pixel
//! transforms and codec to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - `JsImageBuffer`, the BGR image wrapper
//! - `session` - `JsEditSession`: load, commit, preview, undo/redo, effects
//! - `preview` - `JsPreviewCoordinator`: slider press/change/release
//! - `transform` - one binding per pixel transform
//! - `codec` - decoding and PNG/JPEG encoding
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsEditSession } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsEditSession();
//! session.load(decode_image(new Uint8Array(await file.arrayBuffer())), file.name);
//! console.log(session.status_text());
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod preview;
mod session;
mod transform;
mod types;

// Re-export public types
pub use codec::{decode_image, encode_jpeg, encode_png};
pub use preview::JsPreviewCoordinator;
pub use session::JsEditSession;
pub use transform::{
    blur, brightness, contrast, edge_detect, flip, grayscale, resize_scale, rotate,
};
pub use types::JsImageBuffer;

/// Initialize the WASM module (called automatically on load).
///
/// Routes panics and `tracing` events to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "retouch wasm ready");
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
