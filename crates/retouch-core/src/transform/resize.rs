//! Percentage scaling.
//!
//! Downscaling averages every source pixel a destination pixel covers,
//! weighted by the covered area, which avoids the aliasing a point sampler
//! produces on fine detail. Upscaling interpolates linearly through the
//! `image` crate's resampler.

use image::imageops::{self, FilterType};

use crate::buffer::{ImageBuffer, CHANNELS};

/// Smallest accepted scale percentage.
pub const SCALE_MIN: i32 = 10;
/// Largest accepted scale percentage.
pub const SCALE_MAX: i32 = 200;

/// Resampling method chosen for a scale percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Area-weighted averaging, used when shrinking.
    Area,
    /// Bilinear interpolation, used when enlarging or keeping size.
    Linear,
}

impl Interpolation {
    /// Area below 100%, linear otherwise.
    pub fn for_percent(percent: i32) -> Self {
        if percent < 100 {
            Interpolation::Area
        } else {
            Interpolation::Linear
        }
    }
}

/// Target dimensions for a scale percentage.
///
/// `percent` is clamped to `[10, 200]`. Each axis is
/// `floor(old * percent / 100)` and never less than one pixel.
pub fn scaled_dimensions(width: u32, height: u32, percent: i32) -> (u32, u32) {
    let percent = percent.clamp(SCALE_MIN, SCALE_MAX) as u64;
    let scale = |v: u32| ((v as u64 * percent / 100).max(1)) as u32;
    (scale(width), scale(height))
}

/// Scale both axes by `percent`.
pub fn resize_scale(image: &ImageBuffer, percent: i32) -> ImageBuffer {
    let percent = percent.clamp(SCALE_MIN, SCALE_MAX);
    let (new_w, new_h) = scaled_dimensions(image.width(), image.height(), percent);

    // Fast path: if dimensions match, just clone
    if (new_w, new_h) == image.dimensions() {
        return image.clone();
    }

    match Interpolation::for_percent(percent) {
        Interpolation::Area => resize_area(image, new_w, new_h),
        Interpolation::Linear => {
            let resized = imageops::resize(&image.to_channel_image(), new_w, new_h, FilterType::Triangle);
            ImageBuffer::from_channel_image(resized)
        }
    }
}

/// Per destination index, the source indices it covers and their weights.
/// Weights for one destination index sum to 1.
fn coverage(src_len: usize, dst_len: usize) -> Vec<Vec<(usize, f32)>> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|i| {
            let start = i as f64 * scale;
            let end = ((i + 1) as f64 * scale).min(src_len as f64);
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src_len);

            (first..last)
                .filter_map(|j| {
                    let overlap = end.min((j + 1) as f64) - start.max(j as f64);
                    (overlap > 1e-9).then(|| (j, (overlap / scale) as f32))
                })
                .collect()
        })
        .collect()
}

fn resize_area(image: &ImageBuffer, new_w: u32, new_h: u32) -> ImageBuffer {
    let (src_w, src_h) = (image.width() as usize, image.height() as usize);
    let (dst_w, dst_h) = (new_w as usize, new_h as usize);
    let src = image.pixels();

    // Horizontal pass: src_w x src_h -> dst_w x src_h
    let columns = coverage(src_w, dst_w);
    let mut horizontal = vec![0.0f32; dst_w * src_h * CHANNELS];
    for y in 0..src_h {
        for (x, taps) in columns.iter().enumerate() {
            let dst_idx = (y * dst_w + x) * CHANNELS;
            for &(sx, weight) in taps {
                let src_idx = (y * src_w + sx) * CHANNELS;
                for c in 0..CHANNELS {
                    horizontal[dst_idx + c] += weight * src[src_idx + c] as f32;
                }
            }
        }
    }

    // Vertical pass: dst_w x src_h -> dst_w x dst_h
    let rows = coverage(src_h, dst_h);
    let mut output = vec![0u8; dst_w * dst_h * CHANNELS];
    for (y, taps) in rows.iter().enumerate() {
        for x in 0..dst_w {
            let dst_idx = (y * dst_w + x) * CHANNELS;
            for c in 0..CHANNELS {
                let sum: f32 = taps
                    .iter()
                    .map(|&(sy, weight)| weight * horizontal[(sy * dst_w + x) * CHANNELS + c])
                    .sum();
                output[dst_idx + c] = sum.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    ImageBuffer::from_raw_parts(new_w, new_h, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(scaled_dimensions(100, 50, 50), (50, 25));
        assert_eq!(scaled_dimensions(100, 50, 200), (200, 100));
        assert_eq!(scaled_dimensions(33, 7, 50), (16, 3));
        assert_eq!(scaled_dimensions(100, 50, 100), (100, 50));
    }

    #[test]
    fn test_scaled_dimensions_clamps_percent() {
        assert_eq!(scaled_dimensions(100, 100, 5), (10, 10));
        assert_eq!(scaled_dimensions(100, 100, 500), (200, 200));
    }

    #[test]
    fn test_scaled_dimensions_minimum_one_pixel() {
        assert_eq!(scaled_dimensions(3, 1, 10), (1, 1));
    }

    #[test]
    fn test_interpolation_policy() {
        assert_eq!(Interpolation::for_percent(10), Interpolation::Area);
        assert_eq!(Interpolation::for_percent(99), Interpolation::Area);
        assert_eq!(Interpolation::for_percent(100), Interpolation::Linear);
        assert_eq!(Interpolation::for_percent(200), Interpolation::Linear);
    }

    #[test]
    fn test_resize_hundred_percent_is_identity() {
        let img = ImageBuffer::new(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(resize_scale(&img, 100), img);
    }

    #[test]
    fn test_resize_half_averages_blocks() {
        // 4x2 with two 2x2 blocks: left all 0, right all 200
        let mut pixels = Vec::new();
        for _ in 0..2 {
            for x in 0..4 {
                let v = if x < 2 { 0 } else { 200 };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        let img = ImageBuffer::new(4, 2, pixels).unwrap();
        let result = resize_scale(&img, 50);

        assert_eq!(result.dimensions(), (2, 1));
        assert_eq!(result.pixel(0, 0), [0, 0, 0]);
        assert_eq!(result.pixel(1, 0), [200, 200, 200]);
    }

    #[test]
    fn test_resize_down_mixes_checker() {
        let mut pixels = Vec::new();
        for y in 0..2 {
            for x in 0..2 {
                let v = if (x + y) % 2 == 0 { 0 } else { 200 };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        let img = ImageBuffer::new(2, 2, pixels).unwrap();
        let result = resize_scale(&img, 50);

        assert_eq!(result.dimensions(), (1, 1));
        assert_eq!(result.pixel(0, 0), [100, 100, 100]);
    }

    #[test]
    fn test_resize_up_doubles_dimensions() {
        let img = ImageBuffer::filled(5, 3, [10, 20, 30]).unwrap();
        let result = resize_scale(&img, 200);

        assert_eq!(result.dimensions(), (10, 6));
        // Flat input stays flat and channel order is untouched
        assert!(result
            .pixels()
            .chunks_exact(3)
            .all(|bgr| bgr == [10, 20, 30]));
    }

    #[test]
    fn test_resize_clamps_percent() {
        let img = ImageBuffer::filled(100, 100, [1, 2, 3]).unwrap();
        assert_eq!(resize_scale(&img, 5).dimensions(), (10, 10));
        assert_eq!(resize_scale(&img, 500).dimensions(), (200, 200));
    }

    #[test]
    fn test_coverage_weights_sum_to_one() {
        for (src, dst) in [(10, 3), (7, 2), (100, 10), (5, 4)] {
            for taps in coverage(src, dst) {
                let sum: f32 = taps.iter().map(|&(_, w)| w).sum();
                assert!((sum - 1.0).abs() < 1e-4, "{}->{} sums to {}", src, dst, sum);
            }
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Output dimensions always follow the floor rule.
        #[test]
        fn prop_resize_dimensions(
            w in 1u32..=40,
            h in 1u32..=40,
            percent in -50i32..=400,
        ) {
            let img = ImageBuffer::filled(w, h, [9, 99, 199]).unwrap();
            let result = resize_scale(&img, percent);
            prop_assert_eq!(result.dimensions(), scaled_dimensions(w, h, percent));
        }

        /// Property: Scaling a flat image keeps it flat.
        #[test]
        fn prop_flat_image_stays_flat(
            w in 1u32..=30,
            h in 1u32..=30,
            percent in 10i32..=200,
            bgr in any::<[u8; 3]>(),
        ) {
            let img = ImageBuffer::filled(w, h, bgr).unwrap();
            let result = resize_scale(&img, percent);
            for px in result.pixels().chunks_exact(3) {
                prop_assert_eq!(px, &bgr[..]);
            }
        }
    }
}
