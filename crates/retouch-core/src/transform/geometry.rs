//! Lossless geometric transforms: quarter-turn rotation and mirroring.
//!
//! These only move pixels, so they are exact: four 90° turns or two flips
//! along the same axis reproduce the input byte for byte.

use std::fmt;
use std::str::FromStr;

use image::imageops;
use serde::{Deserialize, Serialize};

use crate::buffer::ImageBuffer;
use crate::error::EditError;

/// Mirror axis for [`flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlipMode {
    /// Mirror columns (left becomes right).
    Horizontal,
    /// Mirror rows (top becomes bottom).
    Vertical,
}

impl FlipMode {
    /// Identifier accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            FlipMode::Horizontal => "horizontal",
            FlipMode::Vertical => "vertical",
        }
    }
}

impl fmt::Display for FlipMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlipMode {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(FlipMode::Horizontal),
            "vertical" => Ok(FlipMode::Vertical),
            other => Err(EditError::UnsupportedEffect(format!(
                "unknown flip mode '{}'",
                other
            ))),
        }
    }
}

/// Normalize an angle in degrees into `0..360`.
#[inline]
pub fn normalize_degrees(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// Rotate clockwise by a multiple of 90 degrees.
///
/// The angle is normalized into `0..360` first, so -90 is the same as 270.
/// Angles that are not a quarter turn return an unchanged copy.
/// 90° and 270° swap width and height.
pub fn rotate(image: &ImageBuffer, degrees: i32) -> ImageBuffer {
    let degrees = normalize_degrees(degrees);
    if !matches!(degrees, 90 | 180 | 270) {
        return image.clone();
    }

    let src = image.to_channel_image();
    let rotated = match degrees {
        90 => imageops::rotate90(&src),
        180 => imageops::rotate180(&src),
        _ => imageops::rotate270(&src),
    };
    ImageBuffer::from_channel_image(rotated)
}

/// Mirror the image along the given axis.
pub fn flip(image: &ImageBuffer, mode: FlipMode) -> ImageBuffer {
    let src = image.to_channel_image();
    let flipped = match mode {
        FlipMode::Horizontal => imageops::flip_horizontal(&src),
        FlipMode::Vertical => imageops::flip_vertical(&src),
    };
    ImageBuffer::from_channel_image(flipped)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
