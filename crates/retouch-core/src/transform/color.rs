//! Per-pixel color transforms: grayscale, brightness and contrast.
//!
//! Brightness and contrast are lookup-table operations: every channel value
//! maps through the same 256-entry table, saturating at 0 and 255.

use crate::buffer::ImageBuffer;
use crate::error::EditError;
use crate::luminance::{expand_plane, luma_plane};

/// Lowest accepted brightness offset.
pub const BRIGHTNESS_MIN: i32 = -100;
/// Highest accepted brightness offset.
pub const BRIGHTNESS_MAX: i32 = 100;

/// Lowest accepted contrast factor.
pub const CONTRAST_MIN: f64 = 0.5;
/// Highest accepted contrast factor.
pub const CONTRAST_MAX: f64 = 3.0;

/// Convert to luma and re-expand to three identical channels.
pub fn grayscale(image: &ImageBuffer) -> ImageBuffer {
    let plane = luma_plane(image);
    expand_plane(image.width(), image.height(), &plane)
}

/// Add `beta` to every channel value.
///
/// `beta` is clamped to `[-100, 100]`; results saturate to `[0, 255]`.
pub fn brightness(image: &ImageBuffer, beta: i32) -> ImageBuffer {
    let beta = beta.clamp(BRIGHTNESS_MIN, BRIGHTNESS_MAX);
    let lut = build_lut(|v| v as f64 + beta as f64);
    apply_lut(image, &lut)
}

/// Multiply every channel value by `alpha`.
///
/// `alpha` is clamped to `[0.5, 3.0]`; results are rounded half to even and
/// saturate to `[0, 255]`, so `5 * 0.5` gives 2.
///
/// # Errors
///
/// Returns `EditError::UnsupportedEffect` if `alpha` is NaN or infinite.
pub fn contrast(image: &ImageBuffer, alpha: f64) -> Result<ImageBuffer, EditError> {
    if !alpha.is_finite() {
        return Err(EditError::UnsupportedEffect(format!(
            "contrast factor must be finite, got {}",
            alpha
        )));
    }
    let alpha = alpha.clamp(CONTRAST_MIN, CONTRAST_MAX);
    let lut = build_lut(|v| v as f64 * alpha);
    Ok(apply_lut(image, &lut))
}

/// Build a saturating lookup table from a per-value mapping.
fn build_lut(f: impl Fn(u8) -> f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, entry) in lut.iter_mut().enumerate() {
        *entry = f(i as u8).round_ties_even().clamp(0.0, 255.0) as u8;
    }
    lut
}

fn apply_lut(image: &ImageBuffer, lut: &[u8; 256]) -> ImageBuffer {
    let pixels = image.pixels().iter().map(|&v| lut[v as usize]).collect();
    ImageBuffer::from_raw_parts(image.width(), image.height(), pixels)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = ImageBuffer> {
        (1u32..=16, 1u32..=16).prop_flat_map(|(w, h)| {
            let size = (w * h * 3) as usize;
            prop::collection::vec(any::<u8>(), size..=size)
                .prop_map(move |pixels| ImageBuffer::new(w, h, pixels).unwrap())
        })
    }

    proptest! {
        /// Property: Brightness never decreases a channel for positive beta.
        #[test]
        fn prop_brightness_monotonic(img in image_strategy(), beta in 0i32..=100) {
            let result = brightness(&img, beta);
            for (before, after) in img.pixels().iter().zip(result.pixels()) {
                prop_assert!(after >= before);
            }
        }

        /// Property: Contrast preserves dimensions.
        #[test]
        fn prop_contrast_preserves_dimensions(img in image_strategy(), alpha in 0.5f64..=3.0) {
            let result = contrast(&img, alpha).unwrap();
            prop_assert_eq!(result.dimensions(), img.dimensions());
        }

        /// Property: Grayscale output has three equal channels.
        #[test]
        fn prop_grayscale_channels_equal(img in image_strategy()) {
            let gray = grayscale(&img);
            for bgr in gray.pixels().chunks_exact(3) {
                prop_assert!(bgr[0] == bgr[1] && bgr[1] == bgr[2]);
            }
        }
    }
}
