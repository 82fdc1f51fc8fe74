//! Error types shared by the transform library, the edit session and the
//! preview coordinator.

use thiserror::Error;

/// Errors raised by editing operations.
///
/// An empty undo or redo history is not an error: `undo` and `redo` report
/// it as a `false` result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Pixel data is empty, has a zero dimension, or does not hold exactly
    /// `width * height * 3` bytes.
    #[error("Invalid image buffer: {width}x{height} with {len} bytes (expected non-zero dimensions and width * height * 3 bytes)")]
    InvalidBuffer { width: u32, height: u32, len: usize },

    /// A mutating operation was called before any image was loaded.
    #[error("No image loaded")]
    NoImageLoaded,

    /// Unknown effect identifier, or a parameter that cannot be clamped
    /// into range (e.g. a non-finite contrast factor).
    #[error("Unsupported effect: {0}")]
    UnsupportedEffect(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_error_display() {
        let err = EditError::InvalidBuffer {
            width: 0,
            height: 10,
            len: 0,
        };
        assert!(err.to_string().starts_with("Invalid image buffer: 0x10 with 0 bytes"));

        assert_eq!(EditError::NoImageLoaded.to_string(), "No image loaded");

        let err = EditError::UnsupportedEffect("sepia".to_string());
        assert_eq!(err.to_string(), "Unsupported effect: sepia");
    }
}
