//! Gaussian blur with an odd, square kernel.
//!
//! # Algorithm
//!
//! The 2D Gaussian is separable, so the blur runs as a horizontal pass
//! followed by a vertical pass with the same 1D kernel. Borders are handled
//! by reflecting around the edge pixel (`dcb|abcdefgh|gfe`), which keeps
//! flat images flat all the way to the edges.
//!
//! The standard deviation is derived from the kernel size:
//! ```text
//! sigma = 0.3 * ((size - 1) * 0.5 - 1) + 0.8
//! ```
//!
//! Work grows with the kernel size, so sizes above [`BLUR_MAX_KERNEL`] are
//! rejected rather than attempted.

use crate::buffer::{ImageBuffer, CHANNELS};
use crate::error::EditError;

/// Largest kernel size `blur` accepts (intensity 255).
pub const BLUR_MAX_KERNEL: usize = 255;

/// Kernel size for a blur intensity.
///
/// Intensity is clamped to at least 1 and even values are bumped to the next
/// odd number, so 4 and 5 both give 5.
pub fn blur_kernel_size(intensity: i32) -> usize {
    let size = intensity.max(1) as usize;
    if size % 2 == 0 {
        size + 1
    } else {
        size
    }
}

/// Normalized 1D Gaussian weights for an odd kernel size.
pub fn gaussian_kernel(size: usize) -> Vec<f32> {
    let size = if size % 2 == 0 { size + 1 } else { size };
    if size == 1 {
        return vec![1.0];
    }

    let sigma = 0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let half = (size / 2) as f64;
    let two_sigma2 = 2.0 * sigma * sigma;

    let weights: Vec<f64> = (0..size)
        .map(|i| {
            let d = i as f64 - half;
            (-(d * d) / two_sigma2).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();

    weights.iter().map(|w| (w / sum) as f32).collect()
}

/// Apply Gaussian smoothing with a kernel derived from `intensity`.
///
/// # Errors
///
/// Returns `EditError::UnsupportedEffect` if the kernel size would exceed
/// [`BLUR_MAX_KERNEL`].
pub fn blur(image: &ImageBuffer, intensity: i32) -> Result<ImageBuffer, EditError> {
    let size = blur_kernel_size(intensity);
    if size > BLUR_MAX_KERNEL {
        return Err(EditError::UnsupportedEffect(format!(
            "blur intensity {} exceeds the maximum kernel size {}",
            intensity, BLUR_MAX_KERNEL
        )));
    }
    if size == 1 {
        return Ok(image.clone());
    }

    let kernel = gaussian_kernel(size);
    let (width, height) = (image.width() as usize, image.height() as usize);
    let src: Vec<f32> = image.pixels().iter().map(|&v| v as f32).collect();

    let horizontal = convolve_rows(&src, width, height, &kernel);
    let vertical = convolve_columns(&horizontal, width, height, &kernel);

    let pixels = vertical
        .iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect();
    Ok(ImageBuffer::from_raw_parts(image.width(), image.height(), pixels))
}

/// Map an out-of-range index back into `0..len` by reflecting around the
/// edge pixels without repeating them.
#[inline]
pub(crate) fn reflect_101(index: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let i = index.rem_euclid(period);
    if i >= len as isize {
        (period - i) as usize
    } else {
        i as usize
    }
}

/// Source index for every kernel tap at every position along an axis.
fn tap_table(len: usize, kernel_len: usize) -> Vec<usize> {
    let radius = (kernel_len / 2) as isize;
    let mut table = Vec::with_capacity(len * kernel_len);
    for pos in 0..len as isize {
        for k in 0..kernel_len as isize {
            table.push(reflect_101(pos + k - radius, len));
        }
    }
    table
}

fn convolve_rows(src: &[f32], width: usize, height: usize, kernel: &[f32]) -> Vec<f32> {
    let taps = tap_table(width, kernel.len());
    let mut dst = vec![0.0f32; src.len()];

    for y in 0..height {
        let row = y * width;
        for x in 0..width {
            let sources = &taps[x * kernel.len()..(x + 1) * kernel.len()];
            for c in 0..CHANNELS {
                let mut sum = 0.0f32;
                for (weight, &sx) in kernel.iter().zip(sources) {
                    sum += weight * src[(row + sx) * CHANNELS + c];
                }
                dst[(row + x) * CHANNELS + c] = sum;
            }
        }
    }

    dst
}

fn convolve_columns(src: &[f32], width: usize, height: usize, kernel: &[f32]) -> Vec<f32> {
    let taps = tap_table(height, kernel.len());
    let mut dst = vec![0.0f32; src.len()];

    for y in 0..height {
        let sources = &taps[y * kernel.len()..(y + 1) * kernel.len()];
        for x in 0..width {
            for c in 0..CHANNELS {
                let mut sum = 0.0f32;
                for (weight, &sy) in kernel.iter().zip(sources) {
                    sum += weight * src[(sy * width + x) * CHANNELS + c];
                }
                dst[(y * width + x) * CHANNELS + c] = sum;
            }
        }
    }

    dst
}
