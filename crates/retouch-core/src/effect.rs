//! Effects as values.
//!
//! [`Effect`] is a closed set of parameterized transforms that can be stored,
//! serialized and applied later. [`SliderEffect`] names the effects driven by
//! a continuous control, together with the value domain of that control.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::buffer::ImageBuffer;
use crate::error::EditError;
use crate::transform::{self, FlipMode};

/// A transform together with its parameters.
///
/// Serialized with an internal `kind` tag, for example
/// `{"kind": "blur", "intensity": 7}` or `{"kind": "grayscale"}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect {
    Grayscale,
    Blur { intensity: i32 },
    EdgeDetect { threshold: i32 },
    Brightness { beta: i32 },
    Contrast { alpha: f64 },
    Rotate { degrees: i32 },
    Flip { mode: FlipMode },
    ResizeScale { percent: i32 },
}

impl Effect {
    /// Run the transform on `image`, returning a new buffer.
    ///
    /// # Errors
    ///
    /// Returns `EditError::UnsupportedEffect` for a non-finite contrast factor
    /// or a blur kernel larger than [`BLUR_MAX_KERNEL`](transform::BLUR_MAX_KERNEL).
    pub fn apply(&self, image: &ImageBuffer) -> Result<ImageBuffer, EditError> {
        trace!(effect = %self, width = image.width(), height = image.height(), "apply effect");
        let result = match *self {
            Effect::Grayscale => transform::grayscale(image),
            Effect::Blur { intensity } => transform::blur(image, intensity)?,
            Effect::EdgeDetect { threshold } => transform::edge_detect(image, threshold),
            Effect::Brightness { beta } => transform::brightness(image, beta),
            Effect::Contrast { alpha } => transform::contrast(image, alpha)?,
            Effect::Rotate { degrees } => transform::rotate(image, degrees),
            Effect::Flip { mode } => transform::flip(image, mode),
            Effect::ResizeScale { percent } => transform::resize_scale(image, percent),
        };
        Ok(result)
    }

    /// Stable snake_case name, the same as the serde tag.
    pub fn name(&self) -> &'static str {
        match self {
            Effect::Grayscale => "grayscale",
            Effect::Blur { .. } => "blur",
            Effect::EdgeDetect { .. } => "edge_detect",
            Effect::Brightness { .. } => "brightness",
            Effect::Contrast { .. } => "contrast",
            Effect::Rotate { .. } => "rotate",
            Effect::Flip { .. } => "flip",
            Effect::ResizeScale { .. } => "resize_scale",
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Effect::Grayscale => f.write_str("grayscale"),
            Effect::Blur { intensity } => write!(f, "blur({})", intensity),
            Effect::EdgeDetect { threshold } => write!(f, "edge_detect({})", threshold),
            Effect::Brightness { beta } => write!(f, "brightness({})", beta),
            Effect::Contrast { alpha } => write!(f, "contrast({})", alpha),
            Effect::Rotate { degrees } => write!(f, "rotate({})", degrees),
            Effect::Flip { mode } => write!(f, "flip({})", mode),
            Effect::ResizeScale { percent } => write!(f, "resize_scale({})", percent),
        }
    }
}

/// Inclusive value domain of a slider control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl ParamRange {
    /// Range `[min, max]` with a starting value.
    pub const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    /// Clamp a raw control value into the range. NaN maps to the default.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Whether `value` lies inside the range, bounds included.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Effects that are explored with a slider and previewed while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliderEffect {
    #[default]
    Blur,
    EdgeDetect,
    Brightness,
    Contrast,
    Resize,
}

impl SliderEffect {
    /// Every slider effect, in menu order.
    pub const ALL: [SliderEffect; 5] = [
        SliderEffect::Blur,
        SliderEffect::EdgeDetect,
        SliderEffect::Brightness,
        SliderEffect::Contrast,
        SliderEffect::Resize,
    ];

    /// Slider domain for this effect.
    ///
    /// | Effect | Range | Default |
    /// |---|---|---|
    /// | blur | 1 to 25 | 5 |
    /// | edge | 10 to 150 | 50 |
    /// | brightness | -100 to 100 | 0 |
    /// | contrast | 50 to 300 | 100 |
    /// | resize | 10 to 200 | 100 |
    pub const fn range(self) -> ParamRange {
        match self {
            SliderEffect::Blur => ParamRange::new(1.0, 25.0, 5.0),
            SliderEffect::EdgeDetect => ParamRange::new(10.0, 150.0, 50.0),
            SliderEffect::Brightness => ParamRange::new(-100.0, 100.0, 0.0),
            SliderEffect::Contrast => ParamRange::new(50.0, 300.0, 100.0),
            SliderEffect::Resize => ParamRange::new(10.0, 200.0, 100.0),
        }
    }

    /// Map a slider value to a concrete effect.
    ///
    /// The value is clamped to [`range`](Self::range) first. Integer
    /// parameters truncate toward zero; contrast uses `value / 100`.
    pub fn effect_at(self, value: f64) -> Effect {
        let value = self.range().clamp(value);
        match self {
            SliderEffect::Blur => Effect::Blur {
                intensity: value as i32,
            },
            SliderEffect::EdgeDetect => Effect::EdgeDetect {
                threshold: value as i32,
            },
            SliderEffect::Brightness => Effect::Brightness { beta: value as i32 },
            SliderEffect::Contrast => Effect::Contrast {
                alpha: value / 100.0,
            },
            SliderEffect::Resize => Effect::ResizeScale {
                percent: value as i32,
            },
        }
    }

    /// Short identifier used by front ends.
    pub fn identifier(self) -> &'static str {
        match self {
            SliderEffect::Blur => "blur",
            SliderEffect::EdgeDetect => "edge",
            SliderEffect::Brightness => "brightness",
            SliderEffect::Contrast => "contrast",
            SliderEffect::Resize => "resize",
        }
    }
}

impl fmt::Display for SliderEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

impl FromStr for SliderEffect {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blur" => Ok(SliderEffect::Blur),
            "edge" | "edge_detect" => Ok(SliderEffect::EdgeDetect),
            "brightness" => Ok(SliderEffect::Brightness),
            "contrast" => Ok(SliderEffect::Contrast),
            "resize" | "resize_scale" => Ok(SliderEffect::Resize),
            other => Err(EditError::UnsupportedEffect(format!(
                "unknown slider effect '{}'",
                other
            ))),
        }
    }
}
