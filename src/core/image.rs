//! # Image Buffers
//!
//! The two pixel buffers that flow through a conversion:
//!
//! - [`FloatImage`]: packed linear RGB `f32`, 3 samples per pixel
//! - [`RgbeImage`]: packed RGBE bytes, 4 samples per pixel (`R_m, G_m, B_m, E`)
//!
//! Both are row-major with no padding between rows.

use rgbe_scale::ladder::Size;

use crate::error::{ConvertError, ConvertResult};

/// Samples per pixel of a [`FloatImage`].
pub const RGB_CHANNELS: usize = 3;
/// Samples per pixel of an [`RgbeImage`].
pub const RGBE_CHANNELS: usize = 4;

/// Linear-light RGB image with one `f32` per channel.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatImage {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl FloatImage {
    /// Wrap a packed RGB buffer. Fails if `data` is not `width * height * 3` long.
    pub fn new(width: u32, height: u32, data: Vec<f32>) -> ConvertResult<Self> {
        let expected = Size::new(width, height).area() * RGB_CHANNELS;
        if data.len() != expected {
            return Err(ConvertError::validation(
                "float_image.data",
                format!("length must be {} for {}x{} RGB", expected, width, height),
                data.len().to_string(),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image where every pixel has the same colour.
    pub fn filled(width: u32, height: u32, rgb: [f32; 3]) -> Self {
        let data = (0..Size::new(width, height).area())
            .flat_map(|_| rgb)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    pub(crate) fn from_pixels(width: u32, height: u32, pixels: impl Iterator<Item = [f32; 3]>) -> Self {
        let data: Vec<f32> = pixels.flatten().collect();
        debug_assert_eq!(data.len(), Size::new(width, height).area() * RGB_CHANNELS);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn pixels(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.data
            .chunks_exact(RGB_CHANNELS)
            .map(|px| [px[0], px[1], px[2]])
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * RGB_CHANNELS;
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }
}

impl From<image::Rgb32FImage> for FloatImage {
    fn from(img: image::Rgb32FImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

/// RGBE image: three mantissa bytes and one shared exponent byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbeImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbeImage {
    /// Wrap a packed RGBE buffer. Fails if `data` is not `width * height * 4` long.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> ConvertResult<Self> {
        let expected = Size::new(width, height).area() * RGBE_CHANNELS;
        if data.len() != expected {
            return Err(ConvertError::validation(
                "rgbe_image.data",
                format!("length must be {} for {}x{} RGBE", expected, width, height),
                data.len().to_string(),
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub(crate) fn from_pixels(width: u32, height: u32, pixels: impl Iterator<Item = [u8; 4]>) -> Self {
        let mut data = Vec::with_capacity(Size::new(width, height).area() * RGBE_CHANNELS);
        for px in pixels {
            data.extend_from_slice(&px);
        }
        debug_assert_eq!(data.len(), Size::new(width, height).area() * RGBE_CHANNELS);
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(RGBE_CHANNELS)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * RGBE_CHANNELS;
        Some([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }
}
