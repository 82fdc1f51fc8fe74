//! Reading and writing image files.
//!
//! The session only deals in [`ImageBuffer`]s. This module is the seam to
//! the outside world: [`ImageDecoder`] and [`ImageEncoder`] describe what the
//! editor needs, and [`ImageCodec`] implements both with the `image` crate.
//!
//! Supported formats are JPEG, PNG and BMP. Decoding applies EXIF
//! orientation so buffers are always upright.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::codec::{ImageCodec, ImageDecoder, ImageEncoder};
//!
//! let codec = ImageCodec::new();
//! let image = codec.decode_file("photo.jpg".as_ref())?;
//! codec.encode_file(&image, "photo-edited.png".as_ref())?;
//! ```

mod decode;
mod encode;
mod orientation;

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::buffer::ImageBuffer;
use crate::error::EditError;

pub use decode::decode_bytes;
pub use encode::{encode_bytes, OutputFormat, DEFAULT_JPEG_QUALITY};
pub use orientation::{read_orientation, Orientation};

/// Errors from reading or writing image files.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Source of editable buffers.
pub trait ImageDecoder {
    fn decode_file(&self, path: &Path) -> Result<ImageBuffer, CodecError>;
}

/// Sink for finished buffers.
pub trait ImageEncoder {
    fn encode_file(&self, image: &ImageBuffer, path: &Path) -> Result<(), CodecError>;
}

/// Filesystem codec backed by the `image` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageCodec {
    jpeg_quality: u8,
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

impl ImageCodec {
    /// Codec writing JPEG at the default quality.
    pub fn new() -> Self {
        Self::default()
    }

    /// Quality for `.jpg`/`.jpeg` output, clamped to 1-100.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// JPEG quality used for `.jpg`/`.jpeg` paths.
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}

impl ImageDecoder for ImageCodec {
    fn decode_file(&self, path: &Path) -> Result<ImageBuffer, CodecError> {
        debug!(path = %path.display(), "reading image");
        let bytes = fs::read(path)?;
        decode_bytes(&bytes)
    }
}

impl ImageEncoder for ImageCodec {
    fn encode_file(&self, image: &ImageBuffer, path: &Path) -> Result<(), CodecError> {
        let format = match OutputFormat::from_path(path)? {
            OutputFormat::Jpeg { .. } => OutputFormat::Jpeg {
                quality: self.jpeg_quality,
            },
            other => other,
        };
        let bytes = encode_bytes(image, format)?;
        debug!(path = %path.display(), bytes = bytes.len(), "writing image");
        fs::write(path, bytes)?;
        Ok(())
    }
}
