//! The edit session: one open document and its history.
//!
//! A session owns the buffer being edited, the buffer as it was loaded, and
//! the undo/redo stacks. There are two ways to change the current buffer:
//!
//! - [`commit`](EditSession::commit) records the replaced buffer in history
//!   and clears redo. Use it for finished edits.
//! - [`preview_replace`](EditSession::preview_replace) swaps the buffer and
//!   leaves history alone. Use it while a parameter is still being adjusted.
//!
//! Both go through the same replace step, which also keeps the metadata
//! dimensions in sync.

use std::mem;
use std::path::Path;

use tracing::debug;

use crate::buffer::{ImageBuffer, ImageMetadata};
use crate::codec::{CodecError, ImageDecoder, ImageEncoder};
use crate::config::SessionConfig;
use crate::effect::Effect;
use crate::error::EditError;
use crate::history::History;

/// One open document: the current image, the original and its history.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    current: Option<ImageBuffer>,
    original: Option<ImageBuffer>,
    history: History,
    metadata: ImageMetadata,
    config: SessionConfig,
    document: u64,
}

impl EditSession {
    /// Create an empty session with unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session using `config`.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            history: History::with_limit(config.history_limit),
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Start a fresh document.
    ///
    /// The buffer becomes both the original and the current image, both
    /// history stacks are emptied and the metadata is rebuilt.
    pub fn load(&mut self, image: ImageBuffer, filename: impl Into<String>) {
        let filename = filename.into();
        debug!(
            filename = %filename,
            width = image.width(),
            height = image.height(),
            "load image"
        );
        self.metadata = ImageMetadata::for_image(filename, &image);
        self.original = Some(image.clone());
        self.current = Some(image);
        self.history.clear();
        self.document = self.document.wrapping_add(1);
    }

    /// Counter bumped by every load, including a commit or preview into an
    /// empty session. Edits within one document leave it unchanged.
    pub fn document_id(&self) -> u64 {
        self.document
    }

    /// Decode `path` and load it. The path becomes the metadata filename.
    ///
    /// # Errors
    ///
    /// Returns the decoder's error; the session is unchanged on error.
    pub fn open<D: ImageDecoder + ?Sized>(
        &mut self,
        decoder: &D,
        path: impl AsRef<Path>,
    ) -> Result<(), CodecError> {
        let path = path.as_ref();
        let image = decoder.decode_file(path)?;
        self.load(image, path.to_string_lossy());
        Ok(())
    }

    /// Encode the current image to `path`.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::Edit(EditError::NoImageLoaded)` with no image, or
    /// the encoder's error.
    pub fn save<E: ImageEncoder + ?Sized>(
        &self,
        encoder: &E,
        path: impl AsRef<Path>,
    ) -> Result<(), CodecError> {
        let image = self.current.as_ref().ok_or(EditError::NoImageLoaded)?;
        encoder.encode_file(image, path.as_ref())
    }

    /// Replace the current image as an undoable step.
    ///
    /// With no image loaded this behaves like [`load`](Self::load) and keeps
    /// the existing filename.
    pub fn commit(&mut self, image: ImageBuffer) {
        match self.replace_current(image) {
            Some(previous) => {
                self.history.record(previous);
                debug!(undo = self.history.undo_len(), "commit");
            }
            None => self.reload_current(),
        }
    }

    /// Replace the current image without touching history.
    ///
    /// With no image loaded this behaves like [`load`](Self::load).
    pub fn preview_replace(&mut self, image: ImageBuffer) {
        if self.replace_current(image).is_none() {
            self.reload_current();
        }
    }

    /// Step back one edit. Returns `false`, changing nothing, when there is
    /// nothing to undo.
    pub fn undo(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }
        let Some(previous) = self.history.pop_undo() else {
            return false;
        };
        if let Some(undone) = self.replace_current(previous) {
            self.history.push_redo(undone);
        }
        debug!(
            undo = self.history.undo_len(),
            redo = self.history.redo_len(),
            "undo"
        );
        true
    }

    /// Re-apply the most recently undone edit. Returns `false`, changing
    /// nothing, when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }
        let Some(next) = self.history.pop_redo() else {
            return false;
        };
        if let Some(redone) = self.replace_current(next) {
            self.history.push_undo(redone);
        }
        debug!(
            undo = self.history.undo_len(),
            redo = self.history.redo_len(),
            "redo"
        );
        true
    }

    /// Commit a copy of the loaded image. The reset itself can be undone.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NoImageLoaded` if nothing has been loaded.
    pub fn reset_to_original(&mut self) -> Result<(), EditError> {
        let original = self.original.clone().ok_or(EditError::NoImageLoaded)?;
        debug!("reset to original");
        self.commit(original);
        Ok(())
    }

    /// Apply `effect` to the current image and commit the result.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NoImageLoaded` with no image, or the effect's own
    /// error. The session is unchanged on error.
    pub fn apply(&mut self, effect: &Effect) -> Result<(), EditError> {
        let current = self.current.as_ref().ok_or(EditError::NoImageLoaded)?;
        let edited = effect.apply(current)?;
        self.commit(edited);
        Ok(())
    }

    /// An independent copy of the current image.
    pub fn current(&self) -> Option<ImageBuffer> {
        self.current.clone()
    }

    /// Borrow the current image, for rendering without a copy.
    pub fn current_image(&self) -> Option<&ImageBuffer> {
        self.current.as_ref()
    }

    /// Borrow the image as it was loaded.
    pub fn original_image(&self) -> Option<&ImageBuffer> {
        self.original.as_ref()
    }

    /// Filename and dimensions of the current image.
    pub fn metadata(&self) -> &ImageMetadata {
        &self.metadata
    }

    /// Whether an image has been loaded.
    pub fn has_image(&self) -> bool {
        self.current.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of steps `undo` can take.
    pub fn undo_len(&self) -> usize {
        self.history.undo_len()
    }

    /// Number of steps `redo` can take.
    pub fn redo_len(&self) -> usize {
        self.history.redo_len()
    }

    /// Swap in a new current image and return the one it replaced.
    fn replace_current(&mut self, image: ImageBuffer) -> Option<ImageBuffer> {
        self.metadata.sync_dimensions(&image);
        self.current.replace(image)
    }

    /// Finish a first image that arrived through `commit` or
    /// `preview_replace` as if it had been loaded.
    fn reload_current(&mut self) {
        if let Some(image) = self.current.take() {
            let filename = mem::take(&mut self.metadata).filename().to_string();
            self.load(image, filename);
        }
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
