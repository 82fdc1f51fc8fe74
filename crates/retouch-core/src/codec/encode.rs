//! Encoding BGR buffers for export.

use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder as _};
use tracing::debug;

use super::CodecError;
use crate::buffer::ImageBuffer;

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Output container and its settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    /// Quality is clamped to 1-100.
    Jpeg { quality: u8 },
    Bmp,
}

impl OutputFormat {
    /// Pick a format from a file extension, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `CodecError::UnsupportedFormat` for a missing or unknown
    /// extension.
    pub fn from_path(path: &Path) -> Result<Self, CodecError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| {
                CodecError::UnsupportedFormat(format!("no extension on '{}'", path.display()))
            })?;

        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg {
                quality: DEFAULT_JPEG_QUALITY,
            }),
            "bmp" => Ok(OutputFormat::Bmp),
            other => Err(CodecError::UnsupportedFormat(format!(
                "unknown extension '.{}'",
                other
            ))),
        }
    }
}

/// Encode a buffer in the given format.
///
/// # Errors
///
/// Returns `CodecError::Encode` if the encoder fails.
pub fn encode_bytes(image: &ImageBuffer, format: OutputFormat) -> Result<Vec<u8>, CodecError> {
    let rgb = image.to_rgb_image();
    let (width, height) = rgb.dimensions();
    let mut bytes = Vec::new();

    let result = match format {
        OutputFormat::Png => PngEncoder::new(&mut bytes).write_image(
            rgb.as_raw(),
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
        OutputFormat::Jpeg { quality } => {
            JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100)).write_image(
                rgb.as_raw(),
                width,
                height,
                ExtendedColorType::Rgb8,
            )
        }
        OutputFormat::Bmp => BmpEncoder::new(&mut bytes).write_image(
            rgb.as_raw(),
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
    };
    result.map_err(|e| CodecError::Encode(e.to_string()))?;

    debug!(?format, width, height, bytes = bytes.len(), "encoded image");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(Path::new("out.png")).unwrap(),
            OutputFormat::Png
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("dir/OUT.JPG")).unwrap(),
            OutputFormat::Jpeg { quality: 95 }
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("a.jpeg")).unwrap(),
            OutputFormat::Jpeg { quality: 95 }
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("a.bmp")).unwrap(),
            OutputFormat::Bmp
        );
    }

    #[test]
    fn test_format_from_unknown_path() {
        assert!(matches!(
            OutputFormat::from_path(Path::new("a.tiff")),
            Err(CodecError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            OutputFormat::from_path(Path::new("noext")),
            Err(CodecError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_magic_bytes() {
        let img = ImageBuffer::filled(4, 4, [1, 2, 3]).unwrap();

        let png = encode_bytes(&img, OutputFormat::Png).unwrap();
        assert_eq!(&png[1..4], b"PNG");

        let jpeg = encode_bytes(&img, OutputFormat::Jpeg { quality: 80 }).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);

        let bmp = encode_bytes(&img, OutputFormat::Bmp).unwrap();
        assert_eq!(&bmp[0..2], b"BM");
    }

    #[test]
    fn test_jpeg_quality_affects_size() {
        let mut pixels = Vec::new();
        for i in 0..64 * 64u32 {
            let v = (i.wrapping_mul(2654435761) >> 24) as u8;
            pixels.extend_from_slice(&[v, v / 2, 255 - v]);
        }
        let img = ImageBuffer::new(64, 64, pixels).unwrap();

        let low = encode_bytes(&img, OutputFormat::Jpeg { quality: 10 }).unwrap();
        let high = encode_bytes(&img, OutputFormat::Jpeg { quality: 100 }).unwrap();
        assert!(low.len() < high.len());
    }

    #[test]
    fn test_jpeg_quality_zero_is_clamped() {
        let img = ImageBuffer::filled(4, 4, [9, 9, 9]).unwrap();
        assert!(encode_bytes(&img, OutputFormat::Jpeg { quality: 0 }).is_ok());
    }
}
