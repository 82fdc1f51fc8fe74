//! Canny edge detection on the luma plane.
//!
//! # Algorithm
//!
//! 1. Convert to luma (BT.601)
//! 2. 3x3 Sobel gradients, borders reflected around the edge pixel
//! 3. L1 gradient magnitude `|gx| + |gy|`
//! 4. Non-maximum suppression along the quantized gradient direction
//! 5. Hysteresis: pixels above the high threshold seed edges, which grow
//!    through 8-connected pixels above the low threshold
//!
//! The high threshold is derived from the low one as `min(255, 3 * low)`.

use crate::buffer::ImageBuffer;
use crate::luminance::{expand_plane, luma_plane};

use super::blur::reflect_101;

/// Lowest accepted low threshold.
pub const EDGE_THRESHOLD_MIN: i32 = 10;
/// Highest accepted low threshold.
pub const EDGE_THRESHOLD_MAX: i32 = 150;

const TAN_22_5: f32 = 0.414_213_57;
const TAN_67_5: f32 = 2.414_213_6;

const NOT_EDGE: u8 = 0;
const WEAK: u8 = 1;
const STRONG: u8 = 2;

/// Low and high hysteresis thresholds for a low threshold.
///
/// `threshold1` is clamped to `[10, 150]` and the high threshold is
/// `min(255, 3 * threshold1)`.
pub fn edge_thresholds(threshold1: i32) -> (i32, i32) {
    let low = threshold1.clamp(EDGE_THRESHOLD_MIN, EDGE_THRESHOLD_MAX);
    (low, (low * 3).min(255))
}

/// Detect edges and return them white-on-black in three channels.
pub fn edge_detect(image: &ImageBuffer, threshold1: i32) -> ImageBuffer {
    let (low, high) = edge_thresholds(threshold1);
    let (width, height) = (image.width() as usize, image.height() as usize);

    let gray = luma_plane(image);
    let edges = canny(&gray, width, height, low as f32, high as f32);

    expand_plane(image.width(), image.height(), &edges)
}

fn canny(gray: &[u8], width: usize, height: usize, low: f32, high: f32) -> Vec<u8> {
    let (gx, gy) = sobel(gray, width, height);
    let magnitude: Vec<f32> = gx
        .iter()
        .zip(&gy)
        .map(|(&x, &y)| (x.abs() + y.abs()) as f32)
        .collect();

    let mag_at = |x: isize, y: isize| -> f32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0.0
        } else {
            magnitude[y as usize * width + x as usize]
        }
    };

    // Non-maximum suppression and threshold classification
    let mut class = vec![NOT_EDGE; width * height];
    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;
            let m = magnitude[idx];
            if m <= low {
                continue;
            }

            let (dx, dy) = (gx[idx], gy[idx]);
            let (ax, ay) = (dx.abs() as f32, dy.abs() as f32);
            let (xi, yi) = (x as isize, y as isize);

            let (before, after) = if ay <= ax * TAN_22_5 {
                (mag_at(xi - 1, yi), mag_at(xi + 1, yi))
            } else if ay > ax * TAN_67_5 {
                (mag_at(xi, yi - 1), mag_at(xi, yi + 1))
            } else if (dx > 0) == (dy > 0) {
                (mag_at(xi - 1, yi - 1), mag_at(xi + 1, yi + 1))
            } else {
                (mag_at(xi + 1, yi - 1), mag_at(xi - 1, yi + 1))
            };

            if m > before && m >= after {
                class[idx] = if m > high { STRONG } else { WEAK };
            }
        }
    }

    hysteresis(&class, width, height)
}

/// 3x3 Sobel derivatives.
fn sobel(gray: &[u8], width: usize, height: usize) -> (Vec<i32>, Vec<i32>) {
    let mut gx = vec![0i32; width * height];
    let mut gy = vec![0i32; width * height];

    let at = |x: isize, y: isize| -> i32 {
        let sx = reflect_101(x, width);
        let sy = reflect_101(y, height);
        gray[sy * width + sx] as i32
    };

    for y in 0..height as isize {
        for x in 0..width as isize {
            let idx = y as usize * width + x as usize;
            gx[idx] = (at(x + 1, y - 1) + 2 * at(x + 1, y) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2 * at(x - 1, y) + at(x - 1, y + 1));
            gy[idx] = (at(x - 1, y + 1) + 2 * at(x, y + 1) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2 * at(x, y - 1) + at(x + 1, y - 1));
        }
    }

    (gx, gy)
}

/// Keep strong pixels and every weak pixel 8-connected to one.
fn hysteresis(class: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut edges = vec![0u8; width * height];
    let mut stack: Vec<usize> = Vec::new();

    for (idx, &c) in class.iter().enumerate() {
        if c == STRONG {
            edges[idx] = 255;
            stack.push(idx);
        }
    }

    while let Some(idx) = stack.pop() {
        let (x, y) = ((idx % width) as isize, (idx / width) as isize);
        for ny in y - 1..=y + 1 {
            for nx in x - 1..=x + 1 {
                if nx < 0 || ny < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                let n = ny as usize * width + nx as usize;
                if class[n] == WEAK && edges[n] == 0 {
                    edges[n] = 255;
                    stack.push(n);
                }
            }
        }
    }

    edges
}
