//! Pixel grids: the equirectangular source and the square cube faces.

use image::{Rgb, RgbImage};

use crate::CubemapError;

/// An immutable equirectangular panorama stored as RGB8.
///
/// Any size of at least 1x1 is accepted; 2:1 is conventional but not required.
#[derive(Clone, Debug, PartialEq)]
pub struct EquirectangularImage {
    pixels: RgbImage,
}

impl EquirectangularImage {
    /// Wrap an RGB8 buffer, rejecting an empty image.
    pub fn new(pixels: RgbImage) -> Result<Self, CubemapError> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(CubemapError::EmptySource { width, height });
        }
        Ok(Self { pixels })
    }

    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Returns `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Whether the image has the conventional 2:1 aspect.
    #[must_use]
    pub fn is_two_to_one(&self) -> bool {
        self.width() == self.height() * 2
    }

    /// Color at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.pixels.get_pixel(x, y)
    }

    /// The underlying buffer.
    #[must_use]
    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }
}

/// One square cube face stored as RGB8.
#[derive(Clone, Debug, PartialEq)]
pub struct FaceImage {
    pixels: RgbImage,
}

impl FaceImage {
    /// Build a face by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(size: u32, f: impl FnMut(u32, u32) -> Rgb<u8>) -> Self {
        Self {
            pixels: RgbImage::from_fn(size, size, f),
        }
    }

    /// Wrap a square buffer. Returns `None` if the buffer is not square.
    #[must_use]
    pub fn from_rgb(pixels: RgbImage) -> Option<Self> {
        (pixels.width() == pixels.height()).then_some(Self { pixels })
    }

    /// Wrap without checking. Caller guarantees a square buffer.
    pub(crate) fn from_rgb_unchecked(pixels: RgbImage) -> Self {
        debug_assert_eq!(pixels.width(), pixels.height(), "face must be square");
        Self { pixels }
    }

    /// Edge length in pixels.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.pixels.width()
    }

    /// Color at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is not less than [`size`](Self::size).
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.pixels.get_pixel(x, y)
    }

    /// The underlying buffer.
    #[must_use]
    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }

    /// Consume the face, returning the underlying buffer.
    #[must_use]
    pub fn into_rgb(self) -> RgbImage {
        self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_rejected() {
        let err = EquirectangularImage::new(RgbImage::new(0, 4)).unwrap_err();
        assert_eq!(
            err,
            CubemapError::EmptySource {
                width: 0,
                height: 4
            }
        );
        assert!(EquirectangularImage::new(RgbImage::new(3, 0)).is_err());
    }

    #[test]
    fn test_single_pixel_source_accepted() {
        let image = EquirectangularImage::new(RgbImage::new(1, 1)).unwrap();
        assert_eq!(image.dimensions(), (1, 1));
        assert!(!image.is_two_to_one());
    }

    #[test]
    fn test_aspect_check() {
        let image = EquirectangularImage::new(RgbImage::new(8, 4)).unwrap();
        assert!(image.is_two_to_one());
    }

    #[test]
    fn test_face_from_fn() {
        let face = FaceImage::from_fn(3, |x, y| Rgb([x as u8, y as u8, 7]));
        assert_eq!(face.size(), 3);
        assert_eq!(face.pixel(2, 1), Rgb([2, 1, 7]));
    }

    #[test]
    fn test_face_requires_square_buffer() {
        assert!(FaceImage::from_rgb(RgbImage::new(4, 2)).is_none());
        assert_eq!(FaceImage::from_rgb(RgbImage::new(2, 2)).map(|f| f.size()), Some(2));
    }
}
