//! EXIF orientation.
//!
//! Cameras often store pixels in sensor order and record how to display them
//! in the EXIF Orientation tag. Decoding applies the tag so that the buffer
//! the session receives is upright.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl Orientation {
    /// Whether displaying with this orientation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Read the orientation tag from an encoded file.
///
/// Files without EXIF data, or with an unreadable tag, are `Normal`.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

pub(crate) fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x1 image: red on the left, green on the right.
    fn red_green() -> DynamicImage {
        let pixels = vec![255, 0, 0, 0, 255, 0];
        DynamicImage::ImageRgb8(image::RgbImage::from_raw(2, 1, pixels).unwrap())
    }

    #[test]
    fn test_from_tag_value() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(8), Orientation::Rotate270CW);
        assert_eq!(Orientation::from(0), Orientation::Normal);
        assert_eq!(Orientation::from(42), Orientation::Normal);
    }

    #[test]
    fn test_swaps_dimensions() {
        assert!(Orientation::Rotate90CW.swaps_dimensions());
        assert!(Orientation::Transverse.swaps_dimensions());
        assert!(!Orientation::Rotate180.swaps_dimensions());
        assert!(!Orientation::Normal.swaps_dimensions());
    }

    #[test]
    fn test_read_orientation_without_exif() {
        assert_eq!(read_orientation(&[]), Orientation::Normal);
        assert_eq!(read_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_normal_is_identity() {
        let result = apply_orientation(red_green(), Orientation::Normal).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_rotate90_swaps_dimensions() {
        let result = apply_orientation(red_green(), Orientation::Rotate90CW).into_rgb8();
        assert_eq!(result.dimensions(), (1, 2));
        // Clockwise: the left pixel ends up on top
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_flip_horizontal() {
        let result = apply_orientation(red_green(), Orientation::FlipHorizontal).into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_apply_every_orientation_keeps_pixel_count() {
        for tag in 1..=8u32 {
            let orientation = Orientation::from(tag);
            let result = apply_orientation(red_green(), orientation).into_rgb8();
            let expected = if orientation.swaps_dimensions() {
                (1, 2)
            } else {
                (2, 1)
            };
            assert_eq!(result.dimensions(), expected, "tag {}", tag);
        }
    }
}
