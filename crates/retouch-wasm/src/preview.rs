//! WASM bindings for slider live preview.
//!
//! Wire the slider's pointer events to the coordinator and it keeps the
//! session's history to one entry per drag.
//!
//! ```typescript
//! const preview = new JsPreviewCoordinator('blur');
//! slider.min = preview.min; slider.max = preview.max; slider.value = preview.value;
//!
//! slider.onpointerdown = () => preview.on_press(session);
//! slider.oninput = () => { if (preview.on_change(session, +slider.value)) redraw(); };
//! slider.onpointerup = () => { preview.on_release(session, +slider.value); redraw(); };
//! ```

use retouch_core::{EditError, PreviewCoordinator, SliderEffect};
use wasm_bindgen::prelude::*;

use crate::session::JsEditSession;
use crate::types::to_js_error;

/// Slider live preview bound to a `JsEditSession`.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct JsPreviewCoordinator {
    inner: PreviewCoordinator,
}

#[wasm_bindgen]
impl JsPreviewCoordinator {
    /// Coordinator for the effect named by `effect`
    /// (`"blur"`, `"edge"`, `"brightness"`, `"contrast"` or `"resize"`).
    #[wasm_bindgen(constructor)]
    pub fn new(effect: &str) -> Result<JsPreviewCoordinator, JsValue> {
        Self::for_identifier(effect).map_err(to_js_error)
    }

    /// Switch effects. Returns `false` while a drag is in progress; throws
    /// for an unknown name.
    pub fn select_effect(&mut self, effect: &str) -> Result<bool, JsValue> {
        self.select(effect).map_err(to_js_error)
    }

    /// Start a drag. Returns `false` with no image or a drag already active.
    pub fn on_press(&mut self, session: &JsEditSession) -> bool {
        self.inner.on_press(session.core())
    }

    /// Preview `value`. Returns whether a frame was shown.
    pub fn on_change(&mut self, session: &mut JsEditSession, value: f64) -> Result<bool, JsValue> {
        self.inner
            .on_change(session.core_mut(), value)
            .map_err(to_js_error)
    }

    /// Commit `value` as one undo step. Returns whether anything was committed.
    pub fn on_release(&mut self, session: &mut JsEditSession, value: f64) -> Result<bool, JsValue> {
        self.inner
            .on_release(session.core_mut(), value)
            .map_err(to_js_error)
    }

    /// Abandon the drag and restore the image from before the press.
    pub fn cancel(&mut self, session: &mut JsEditSession) -> bool {
        self.inner.cancel(session.core_mut())
    }

    #[wasm_bindgen(getter)]
    pub fn effect(&self) -> String {
        self.inner.effect().identifier().to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn value(&self) -> f64 {
        self.inner.value()
    }

    /// Lower slider bound.
    #[wasm_bindgen(getter)]
    pub fn min(&self) -> f64 {
        self.inner.range().min
    }

    /// Upper slider bound.
    #[wasm_bindgen(getter)]
    pub fn max(&self) -> f64 {
        self.inner.range().max
    }

    /// Value the slider starts at.
    #[wasm_bindgen(getter)]
    pub fn default_value(&self) -> f64 {
        self.inner.range().default
    }

    #[wasm_bindgen(getter)]
    pub fn is_active(&self) -> bool {
        self.inner.is_active()
    }
}

impl JsPreviewCoordinator {
    fn for_identifier(effect: &str) -> Result<Self, EditError> {
        let kind: SliderEffect = effect.parse()?;
        Ok(Self {
            inner: PreviewCoordinator::new(kind),
        })
    }

    fn select(&mut self, effect: &str) -> Result<bool, EditError> {
        let kind: SliderEffect = effect.parse()?;
        Ok(self.inner.select_effect(kind))
    }
}
