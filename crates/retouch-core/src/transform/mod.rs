//! Pixel transforms over [`ImageBuffer`](crate::ImageBuffer).
//!
//! Every operation is stateless and deterministic: it reads the input buffer
//! and returns a new one. Parameters outside their documented range are
//! clamped rather than rejected.
//!
//! | Operation | Parameter | Output size |
//! |---|---|---|
//! | [`grayscale`] | none | unchanged |
//! | [`blur`] | kernel intensity, forced odd, up to 255 | unchanged |
//! | [`edge_detect`] | low threshold, 10 to 150 | unchanged |
//! | [`brightness`] | offset, -100 to 100 | unchanged |
//! | [`contrast`] | factor, 0.5 to 3.0 | unchanged |
//! | [`rotate`] | clockwise degrees, quarter turns | swapped for 90/270 |
//! | [`flip`] | [`FlipMode`] | unchanged |
//! | [`resize_scale`] | percent, 10 to 200 | scaled |
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - Pixels are BGR, row-major

mod blur;
mod color;
mod edge;
mod geometry;
mod resize;

pub use blur::{blur, blur_kernel_size, gaussian_kernel, BLUR_MAX_KERNEL};
pub use color::{
    brightness, contrast, grayscale, BRIGHTNESS_MAX, BRIGHTNESS_MIN, CONTRAST_MAX, CONTRAST_MIN,
};
pub use edge::{edge_detect, edge_thresholds, EDGE_THRESHOLD_MAX, EDGE_THRESHOLD_MIN};
pub use geometry::{flip, normalize_degrees, rotate, FlipMode};
pub use resize::{resize_scale, scaled_dimensions, Interpolation, SCALE_MAX, SCALE_MIN};
