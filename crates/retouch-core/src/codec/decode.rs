//! Decoding encoded files into BGR buffers.

use std::io::Cursor;

use image::{ImageError, ImageReader};
use tracing::debug;

use super::orientation::{apply_orientation, read_orientation};
use super::CodecError;
use crate::buffer::ImageBuffer;

/// Decode JPEG, PNG or BMP bytes into an upright BGR buffer.
///
/// The format is detected from the content. EXIF orientation is applied,
/// alpha is dropped and samples are converted to 8 bits.
///
/// # Errors
///
/// Returns `CodecError::UnsupportedFormat` if the content is not a supported
/// format and `CodecError::Decode` if the data is corrupt.
pub fn decode_bytes(bytes: &[u8]) -> Result<ImageBuffer, CodecError> {
    let orientation = read_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let format = reader.format().ok_or_else(|| {
        CodecError::UnsupportedFormat("unrecognized image content".to_string())
    })?;
    let img = reader.decode().map_err(map_decode_error)?;

    let rgb = apply_orientation(img, orientation).into_rgb8();
    debug!(
        ?format,
        ?orientation,
        swapped = orientation.swaps_dimensions(),
        width = rgb.width(),
        height = rgb.height(),
        "decoded image"
    );
    Ok(ImageBuffer::from_rgb_image(rgb)?)
}

fn map_decode_error(err: ImageError) -> CodecError {
    match err {
        ImageError::Unsupported(e) => CodecError::UnsupportedFormat(e.to_string()),
        ImageError::IoError(e) => CodecError::Io(e),
        other => CodecError::Decode(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode_bytes, OutputFormat};

    fn sample() -> ImageBuffer {
        let mut pixels = Vec::new();
        for y in 0..6u32 {
            for x in 0..9u32 {
                pixels.extend_from_slice(&[(x * 20) as u8, (y * 30) as u8, 200]);
            }
        }
        ImageBuffer::new(9, 6, pixels).unwrap()
    }

    #[test]
    fn test_decode_png_is_exact() {
        let img = sample();
        let png = encode_bytes(&img, OutputFormat::Png).unwrap();
        let decoded = decode_bytes(&png).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_decode_keeps_bgr_order() {
        // Pure red in BGR
        let img = ImageBuffer::filled(2, 2, [0, 0, 255]).unwrap();
        let bmp = encode_bytes(&img, OutputFormat::Bmp).unwrap();
        assert_eq!(decode_bytes(&bmp).unwrap().pixel(1, 1), [0, 0, 255]);
    }

    #[test]
    fn test_decode_jpeg_dimensions() {
        let img = sample();
        let jpeg = encode_bytes(&img, OutputFormat::Jpeg { quality: 90 }).unwrap();
        let decoded = decode_bytes(&jpeg).unwrap();
        assert_eq!(decoded.dimensions(), (9, 6));
    }

    #[test]
    fn test_decode_garbage_is_unsupported() {
        let result = decode_bytes(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(CodecError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode_bytes(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let png = encode_bytes(&sample(), OutputFormat::Png).unwrap();
        let result = decode_bytes(&png[..png.len() / 2]);
        assert!(result.is_err());
    }
}
