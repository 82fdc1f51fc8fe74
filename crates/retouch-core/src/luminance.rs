//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! Grayscale conversion and edge detection both work on a single luma plane
//! computed from BGR pixels with these weights.

use crate::buffer::{ImageBuffer, CHANNELS};

/// ITU-R BT.601 coefficient for the red channel.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for the green channel.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for the blue channel.
pub const LUMA_B: f32 = 0.114;

/// Calculate luma from a BGR triple (0 to 255).
#[inline]
pub fn luma_bgr(b: u8, g: u8, r: u8) -> u8 {
    let luma = LUMA_B * b as f32 + LUMA_G * g as f32 + LUMA_R * r as f32;
    luma.clamp(0.0, 255.0).round() as u8
}

/// Compute a single-channel luma plane, one byte per pixel.
pub fn luma_plane(image: &ImageBuffer) -> Vec<u8> {
    image
        .pixels()
        .chunks_exact(CHANNELS)
        .map(|bgr| luma_bgr(bgr[0], bgr[1], bgr[2]))
        .collect()
}

/// Expand a single-channel plane back into a 3-channel buffer.
pub(crate) fn expand_plane(width: u32, height: u32, plane: &[u8]) -> ImageBuffer {
    let mut pixels = Vec::with_capacity(plane.len() * CHANNELS);
    for &v in plane {
        pixels.extend_from_slice(&[v, v, v]);
    }
    ImageBuffer::from_raw_parts(width, height, pixels)
}
