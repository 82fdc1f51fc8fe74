//! Live preview for slider-driven effects.
//!
//! A drag is a press, any number of changes, and a release:
//!
//! 1. `on_press` copies the session's current image as the baseline.
//! 2. `on_change` renders the effect from the baseline and shows it with
//!    [`EditSession::preview_replace`]. History is not touched.
//! 3. `on_release` renders once more, puts the baseline back and commits the
//!    result. The drag produces exactly one undo entry, and that entry is
//!    the image as it was before the press.
//!
//! Every frame is computed from the baseline, never from the previous frame,
//! so effects do not compound while dragging.
//!
//! The baseline belongs to the document it was captured from. If the session
//! loads another image mid-drag, the baseline is dropped at the next event
//! and nothing is restored or committed into the new document.

use tracing::{debug, trace, warn};

use crate::buffer::ImageBuffer;
use crate::effect::{ParamRange, SliderEffect};
use crate::error::EditError;
use crate::session::EditSession;

#[derive(Debug, Clone)]
struct Baseline {
    image: ImageBuffer,
    effect: SliderEffect,
    document: u64,
}

/// Slider state for one effect plus the baseline of an active drag.
#[derive(Debug, Clone)]
pub struct PreviewCoordinator {
    effect: SliderEffect,
    value: f64,
    baseline: Option<Baseline>,
}

impl Default for PreviewCoordinator {
    fn default() -> Self {
        Self::new(SliderEffect::default())
    }
}

impl PreviewCoordinator {
    /// Idle coordinator with `effect` selected at its default value.
    pub fn new(effect: SliderEffect) -> Self {
        Self {
            effect,
            value: effect.range().default,
            baseline: None,
        }
    }

    /// Switch the slider to another effect and reset its value.
    ///
    /// Rejected while a drag is in progress.
    pub fn select_effect(&mut self, effect: SliderEffect) -> bool {
        if self.baseline.is_some() {
            warn!(requested = %effect, active = %self.effect, "effect change rejected during drag");
            return false;
        }
        self.effect = effect;
        self.value = effect.range().default;
        debug!(effect = %effect, value = self.value, "select effect");
        true
    }

    /// Begin a drag by capturing the session's current image.
    ///
    /// Returns `false` when the session has no image or a drag is already in
    /// progress; the existing baseline is kept in that case.
    pub fn on_press(&mut self, session: &EditSession) -> bool {
        self.discard_stale(session);
        if self.baseline.is_some() {
            return false;
        }
        let Some(image) = session.current_image() else {
            return false;
        };
        self.baseline = Some(Baseline {
            image: image.clone(),
            effect: self.effect,
            document: session.document_id(),
        });
        debug!(effect = %self.effect, "press");
        true
    }

    /// Store a new slider value and, during a drag, preview it.
    ///
    /// Returns whether a preview frame was shown.
    pub fn on_change(&mut self, session: &mut EditSession, value: f64) -> Result<bool, EditError> {
        self.value = self.effect.range().clamp(value);
        self.discard_stale(session);
        let Some(baseline) = &self.baseline else {
            return Ok(false);
        };
        let frame = render(baseline, self.value)?;
        trace!(effect = %baseline.effect, value = self.value, "preview frame");
        session.preview_replace(frame);
        Ok(true)
    }

    /// End the drag and commit the final value as a single undo step.
    ///
    /// Returns whether anything was committed. Without a drag this only
    /// stores the value.
    pub fn on_release(&mut self, session: &mut EditSession, value: f64) -> Result<bool, EditError> {
        self.value = self.effect.range().clamp(value);
        self.discard_stale(session);
        let Some(baseline) = &self.baseline else {
            return Ok(false);
        };
        let result = render(baseline, self.value)?;

        if let Some(baseline) = self.baseline.take() {
            session.preview_replace(baseline.image);
        }
        session.commit(result);
        debug!(effect = %self.effect, value = self.value, undo = session.undo_len(), "release");
        Ok(true)
    }

    /// Abandon the drag, restoring the baseline without touching history.
    ///
    /// Returns whether a drag was in progress.
    pub fn cancel(&mut self, session: &mut EditSession) -> bool {
        self.discard_stale(session);
        match self.baseline.take() {
            Some(baseline) => {
                session.preview_replace(baseline.image);
                debug!(effect = %self.effect, "drag cancelled");
                true
            }
            None => false,
        }
    }

    /// The selected effect.
    pub fn effect(&self) -> SliderEffect {
        self.effect
    }

    /// Last slider value, clamped into the effect's range.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Slider range of the selected effect.
    pub fn range(&self) -> ParamRange {
        self.effect.range()
    }

    /// Whether a drag is in progress.
    pub fn is_active(&self) -> bool {
        self.baseline.is_some()
    }

    fn discard_stale(&mut self, session: &EditSession) {
        let stale = self
            .baseline
            .as_ref()
            .is_some_and(|baseline| baseline.document != session.document_id());
        if stale {
            warn!(effect = %self.effect, "session reloaded during drag, baseline dropped");
            self.baseline = None;
        }
    }
}

fn render(baseline: &Baseline, value: f64) -> Result<ImageBuffer, EditError> {
    baseline.effect.effect_at(value).apply(&baseline.image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform;

    fn sample(width: u32, height: u32) -> ImageBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = if (x / 2 + y / 2) % 2 == 0 { 230 } else { 20 };
                pixels.extend_from_slice(&[v, v / 2, 255 - v]);
            }
        }
        ImageBuffer::new(width, height, pixels).unwrap()
    }

    fn session_with(img: &ImageBuffer) -> EditSession {
        let mut session = EditSession::new();
        session.load(img.clone(), "drag.png");
        session
    }

    #[test]
    fn test_defaults() {
        let coordinator = PreviewCoordinator::default();
        assert_eq!(coordinator.effect(), SliderEffect::Blur);
        assert_eq!(coordinator.value(), 5.0);
        assert!(!coordinator.is_active());
    }

    #[test]
    fn test_select_effect_resets_value() {
        let mut coordinator = PreviewCoordinator::default();
        assert!(coordinator.select_effect(SliderEffect::Contrast));
        assert_eq!(coordinator.effect(), SliderEffect::Contrast);
        assert_eq!(coordinator.value(), 100.0);
        assert_eq!(coordinator.range(), SliderEffect::Contrast.range());
    }

    #[test]
    fn test_press_without_image() {
        let session = EditSession::new();
        let mut coordinator = PreviewCoordinator::default();
        assert!(!coordinator.on_press(&session));
        assert!(!coordinator.is_active());
    }

    #[test]
    fn test_drag_produces_single_undo_entry() {
        let img = sample(16, 12);
        let mut session = session_with(&img);
        let mut coordinator = PreviewCoordinator::new(SliderEffect::Blur);

        assert!(coordinator.on_press(&session));
        for value in [3.0, 7.0, 11.0] {
            assert!(coordinator.on_change(&mut session, value).unwrap());
            assert_eq!(session.undo_len(), 0);
        }
        assert!(coordinator.on_release(&mut session, 11.0).unwrap());

        assert_eq!(session.undo_len(), 1);
        assert_eq!(session.current(), Some(transform::blur(&img, 11).unwrap()));
        assert!(!coordinator.is_active());

        // The undo entry is the image before the press
        assert!(session.undo());
        assert_eq!(session.current(), Some(img));
    }

    #[test]
    fn test_frames_render_from_baseline() {
        let img = sample(10, 10);
        let mut session = session_with(&img);
        let mut coordinator = PreviewCoordinator::new(SliderEffect::Brightness);

        coordinator.on_press(&session);
        coordinator.on_change(&mut session, 40.0).unwrap();
        coordinator.on_change(&mut session, 40.0).unwrap();

        assert_eq!(session.current(), Some(transform::brightness(&img, 40)));
    }

    #[test]
    fn test_change_without_press_only_stores_value() {
        let img = sample(6, 6);
        let mut session = session_with(&img);
        let mut coordinator = PreviewCoordinator::new(SliderEffect::Blur);

        assert!(!coordinator.on_change(&mut session, 9.0).unwrap());
        assert_eq!(coordinator.value(), 9.0);
        assert_eq!(session.current(), Some(img));
    }

    #[test]
    fn test_release_without_press_is_noop() {
        let img = sample(6, 6);
        let mut session = session_with(&img);
        let mut coordinator = PreviewCoordinator::default();

        assert!(!coordinator.on_release(&mut session, 9.0).unwrap());
        assert_eq!(session.undo_len(), 0);
        assert_eq!(session.current(), Some(img));
    }

    #[test]
    fn test_values_are_clamped() {
        let img = sample(8, 8);
        let mut session = session_with(&img);
        let mut coordinator = PreviewCoordinator::new(SliderEffect::EdgeDetect);

        coordinator.on_press(&session);
        coordinator.on_change(&mut session, 1000.0).unwrap();
        assert_eq!(coordinator.value(), 150.0);
        assert_eq!(session.current(), Some(transform::edge_detect(&img, 150)));

        coordinator.on_release(&mut session, f64::NAN).unwrap();
        assert_eq!(coordinator.value(), 50.0);
    }

    #[test]
    fn test_select_rejected_during_drag() {
        let img = sample(8, 8);
        let session = session_with(&img);
        let mut coordinator = PreviewCoordinator::new(SliderEffect::Blur);

        coordinator.on_press(&session);
        assert!(!coordinator.select_effect(SliderEffect::Resize));
        assert_eq!(coordinator.effect(), SliderEffect::Blur);
    }

    #[test]
    fn test_second_press_keeps_baseline() {
        let img = sample(8, 8);
        let mut session = session_with(&img);
        let mut coordinator = PreviewCoordinator::new(SliderEffect::Brightness);

        coordinator.on_press(&session);
        coordinator.on_change(&mut session, 50.0).unwrap();
        assert!(!coordinator.on_press(&session));

        coordinator.on_release(&mut session, 20.0).unwrap();
        assert_eq!(session.current(), Some(transform::brightness(&img, 20)));
    }

    #[test]
    fn test_cancel_restores_baseline() {
        let img = sample(8, 8);
        let mut session = session_with(&img);
        let mut coordinator = PreviewCoordinator::new(SliderEffect::Contrast);

        coordinator.on_press(&session);
        coordinator.on_change(&mut session, 250.0).unwrap();
        assert!(coordinator.cancel(&mut session));

        assert_eq!(session.current(), Some(img));
        assert_eq!(session.undo_len(), 0);
        assert!(!coordinator.is_active());
        assert!(!coordinator.cancel(&mut session));
    }

    #[test]
    fn test_resize_drag_restores_dimensions_on_undo() {
        let img = sample(20, 10);
        let mut session = session_with(&img);
        let mut coordinator = PreviewCoordinator::new(SliderEffect::Resize);

        coordinator.on_press(&session);
        coordinator.on_change(&mut session, 50.0).unwrap();
        assert_eq!(session.metadata().width(), 10);
        coordinator.on_release(&mut session, 150.0).unwrap();
        assert_eq!(session.metadata().width(), 30);

        session.undo();
        assert_eq!(session.current(), Some(img));
        assert_eq!(session.metadata().width(), 20);
    }

    #[test]
    fn test_load_during_drag_drops_baseline() {
        let first = sample(8, 8);
        let second = sample(5, 3);
        let mut session = session_with(&first);
        let mut coordinator = PreviewCoordinator::new(SliderEffect::Brightness);

        coordinator.on_press(&session);
        coordinator.on_change(&mut session, 60.0).unwrap();
        session.load(second.clone(), "second.png");

        assert!(!coordinator.on_release(&mut session, 60.0).unwrap());
        assert!(!coordinator.is_active());
        assert_eq!(session.current(), Some(second.clone()));
        assert_eq!(session.undo_len(), 0);

        // A fresh drag on the new document works normally
        assert!(coordinator.on_press(&session));
        assert!(coordinator.on_release(&mut session, 10.0).unwrap());
        assert_eq!(session.current(), Some(transform::brightness(&second, 10)));
    }

    #[test]
    fn test_cancel_after_load_restores_nothing() {
        let first = sample(8, 8);
        let second = sample(4, 4);
        let mut session = session_with(&first);
        let mut coordinator = PreviewCoordinator::new(SliderEffect::Blur);

        coordinator.on_press(&session);
        session.load(second.clone(), "second.png");

        assert!(!coordinator.cancel(&mut session));
        assert_eq!(session.current(), Some(second));
    }
}
