//! WASM bindings for the edit session.
//!
//! # Example
//!
//! ```typescript
//! import { JsEditSession, decode_image } from '@retouch/wasm';
//!
//! const session = new JsEditSession();
//! session.load(decode_image(bytes), file.name);
//!
//! session.apply_effect({ kind: 'grayscale' });
//! session.apply_effect({ kind: 'flip', mode: 'horizontal' });
//! session.undo();
//!
//! const image = session.current();
//! console.log(session.status_text()); // "cat.png | 640x480px"
//! ```

use retouch_core::{EditError, EditSession, Effect, SessionConfig};
use wasm_bindgen::prelude::*;

use crate::types::{to_js_error, JsImageBuffer};

/// An open document with undo/redo history.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Empty session with unbounded history.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsEditSession {
        Self::default()
    }

    /// Session configured from a plain object, e.g. `{ history_limit: 50 }`.
    pub fn with_config(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: SessionConfig = serde_wasm_bindgen::from_value(config)?;
        Ok(Self::from_config(config))
    }

    /// Start a fresh document; clears history.
    pub fn load(&mut self, image: &JsImageBuffer, filename: &str) {
        self.inner.load(image.to_core(), filename);
    }

    /// Replace the current image as an undoable step.
    pub fn commit(&mut self, image: &JsImageBuffer) {
        self.inner.commit(image.to_core());
    }

    /// Replace the current image without recording history.
    pub fn preview(&mut self, image: &JsImageBuffer) {
        self.inner.preview_replace(image.to_core());
    }

    /// Step back one edit. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    /// Reapply an undone edit. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    /// Commit the originally loaded image. Throws when nothing is loaded.
    pub fn reset(&mut self) -> Result<(), JsValue> {
        self.inner.reset_to_original().map_err(to_js_error)
    }

    /// Apply an effect object such as `{ kind: 'blur', intensity: 7 }` and
    /// commit the result.
    pub fn apply_effect(&mut self, effect: JsValue) -> Result<(), JsValue> {
        let effect: Effect = serde_wasm_bindgen::from_value(effect)?;
        self.apply(&effect).map_err(to_js_error)
    }

    /// Copy of the current image, or `undefined`.
    pub fn current(&self) -> Option<JsImageBuffer> {
        self.inner.current().map(JsImageBuffer::from_core)
    }

    /// `{ filename, width, height }` of the open document.
    pub fn metadata(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.inner.metadata())?)
    }

    /// Status line such as `"cat.png | 640x480px"`.
    pub fn status_text(&self) -> String {
        self.inner.metadata().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    /// Number of undo steps available.
    #[wasm_bindgen(getter)]
    pub fn undo_count(&self) -> usize {
        self.inner.undo_len()
    }

    /// Number of redo steps available.
    #[wasm_bindgen(getter)]
    pub fn redo_count(&self) -> usize {
        self.inner.redo_len()
    }
}

impl JsEditSession {
    pub(crate) fn from_config(config: SessionConfig) -> Self {
        Self {
            inner: EditSession::with_config(config),
        }
    }

    pub(crate) fn apply(&mut self, effect: &Effect) -> Result<(), EditError> {
        self.inner.apply(effect)
    }

    pub(crate) fn core(&self) -> &EditSession {
        &self.inner
    }

    pub(crate) fn core_mut(&mut self) -> &mut EditSession {
        &mut self.inner
    }
}
