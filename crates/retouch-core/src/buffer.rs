//! Owned BGR pixel buffers and the document metadata that follows them.

use std::fmt;
use std::path::Path;

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::EditError;

/// Number of color channels in every buffer.
pub const CHANNELS: usize = 3;

/// `width * height * 3`, or `None` if it does not fit in `usize`.
fn byte_len_for(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(CHANNELS)
}

/// An owned, immutable 8-bit BGR pixel grid.
///
/// A buffer is valid by construction: both dimensions are non-zero and the
/// pixel data holds exactly `width * height * 3` bytes in row-major order.
/// Cloning produces an independent copy, so two buffers never share pixels.
/// Equality compares dimensions and bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a buffer from BGR pixel data.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidBuffer` if either dimension is zero or the
    /// pixel data length does not match `width * height * 3`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EditError> {
        let expected = byte_len_for(width, height);
        if width == 0 || height == 0 || expected != Some(pixels.len()) {
            return Err(EditError::InvalidBuffer {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer where every pixel has the same BGR value.
    pub fn filled(width: u32, height: u32, bgr: [u8; 3]) -> Result<Self, EditError> {
        let len = byte_len_for(width, height).ok_or(EditError::InvalidBuffer {
            width,
            height,
            len: 0,
        })?;
        let pixels = bgr.iter().copied().cycle().take(len).collect();
        Self::new(width, height, pixels)
    }

    /// Build a buffer from data produced inside the crate, where the length
    /// is already known to be correct.
    pub(crate) fn from_raw_parts(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert!(width > 0 && height > 0, "Zero-sized buffer");
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * CHANNELS,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a buffer from an RGB image, swapping channels into BGR order.
    pub fn from_rgb_image(img: RgbImage) -> Result<Self, EditError> {
        let (width, height) = img.dimensions();
        let mut pixels = img.into_raw();
        for chunk in pixels.chunks_exact_mut(CHANNELS) {
            chunk.swap(0, 2);
        }
        Self::new(width, height, pixels)
    }

    /// Convert to an RGB image, swapping channels out of BGR order.
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let [b, g, r] = self.pixel(x, y);
            Rgb([r, g, b])
        })
    }

    /// Copy into an `image` crate container without touching channel order.
    ///
    /// Used for channel-independent operations such as resampling.
    pub(crate) fn to_channel_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| Rgb(self.pixel(x, y)))
    }

    /// Inverse of [`to_channel_image`](Self::to_channel_image).
    pub(crate) fn from_channel_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::from_raw_parts(width, height, img.into_raw())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// BGR pixel data in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return its BGR pixel data.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Get the BGR value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the buffer.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y as usize) * (self.width as usize) + x as usize) * CHANNELS;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Get the size of the pixel data in bytes.
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }
}

impl fmt::Debug for ImageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Filename and dimensions of the open document.
///
/// Only the edit session updates metadata, as a side effect of changing its
/// current buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    filename: String,
    width: u32,
    height: u32,
}

impl ImageMetadata {
    pub(crate) fn for_image(filename: String, image: &ImageBuffer) -> Self {
        Self {
            filename,
            width: image.width,
            height: image.height,
        }
    }

    pub(crate) fn sync_dimensions(&mut self, image: &ImageBuffer) {
        self.width = image.width;
        self.height = image.height;
    }

    /// Full filename passed at load time (may be empty).
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Final path component of the filename, or the filename itself when it
    /// has none.
    pub fn display_name(&self) -> &str {
        Path::new(&self.filename)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(self.filename.as_str())
    }
}

impl fmt::Display for ImageMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {}x{}px",
            self.display_name(),
            self.width,
            self.height
        )
    }
}
