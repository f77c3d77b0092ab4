use image::{imageops, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::consts::RGBA_CHANNELS;
use crate::error::{KeyoutError, Result};

/// An 8-bit RGB color, as read back from a single pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A decoded RGBA raster.
///
/// Pixels are stored row-major, four bytes each (R, G, B, A), so the backing
/// vector always holds exactly `width * height * 4` bytes. Both dimensions are
/// non-zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes, validating dimensions and length.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(KeyoutError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * RGBA_CHANNELS;
        if data.len() != expected {
            return Err(KeyoutError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let count = width as usize * height as usize;
        let data = rgba.iter().copied().cycle().take(count * RGBA_CHANNELS).collect();
        Self::from_raw(width, height, data)
    }

    pub fn from_rgba_image(image: RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::from_raw(width, height, image.into_raw())
    }

    /// Copy into an `image::RgbaImage` for encoding.
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.data.clone()).ok_or(
            KeyoutError::BufferSize {
                expected: self.width as usize * self.height as usize * RGBA_CHANNELS,
                actual: self.data.len(),
            },
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> usize {
        self.width as usize * RGBA_CHANNELS
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// A buffer with this one's dimensions around `data` of identical length.
    pub(crate) fn with_same_shape(&self, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| (y as usize * self.width as usize + x as usize) * RGBA_CHANNELS)
    }

    /// RGBA value at (x, y), or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(x, y)?;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[i..i + RGBA_CHANNELS]);
        Some(px)
    }

    /// True when the raster is wider than it is tall.
    pub fn is_landscape(&self) -> bool {
        self.height < self.width
    }

    /// Rotate 90 degrees counter-clockwise. The top-right pixel becomes the
    /// top-left one; width and height swap.
    pub fn rotated_ccw(&self) -> Result<Self> {
        let image = self.to_rgba_image()?;
        Self::from_rgba_image(imageops::rotate270(&image))
    }
}
