//! Input decoding and header inspection.

use std::fmt;
use std::path::Path;

use image::{ColorType, ImageDecoder, ImageReader};
use log::debug;

use crate::core::image::{FloatImage, RgbeImage};
use crate::error::{ConvertError, ConvertResult};

fn open_reader(path: &Path) -> ConvertResult<ImageReader<std::io::BufReader<std::fs::File>>> {
    ImageReader::open(path)
        .map_err(|e| ConvertError::io("open input", e).with_path(path))?
        .with_guessed_format()
        .map_err(|e| ConvertError::io("detect input format", e).with_path(path))
}

/// Decode any image the `image` crate understands into linear RGB `f32`.
///
/// Alpha is dropped. 8/16-bit inputs are scaled to `[0, 1]` without removing
/// any transfer curve, so HDR formats (Radiance `.hdr`, OpenEXR) are the
/// intended inputs.
pub fn decode_float_image(path: &Path) -> ConvertResult<FloatImage> {
    let img = open_reader(path)?
        .decode()
        .map_err(|e| ConvertError::decode(path, e))?;
    debug!(
        "decoded {} ({}x{}, {:?})",
        path.display(),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(FloatImage::from(img.into_rgb32f()))
}

/// Header-level description of an image file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub color: ColorType,
}

impl ImageInfo {
    pub fn channels(&self) -> u8 {
        self.color.channel_count()
    }

    /// Channel names concatenated in storage order, e.g. `RGB` or `YA`.
    pub fn channel_names(&self) -> &'static str {
        match (self.color.has_color(), self.color.has_alpha()) {
            (true, true) => "RGBA",
            (true, false) => "RGB",
            (false, true) => "YA",
            (false, false) => "Y",
        }
    }

    /// Per-channel storage type.
    pub fn sample_type(&self) -> &'static str {
        match self.color.bytes_per_pixel() / self.color.channel_count().max(1) {
            1 => "uint8",
            2 => "uint16",
            4 => "float",
            _ => "unknown",
        }
    }
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Width={}", self.width)?;
        writeln!(f, "Height={}", self.height)?;
        writeln!(f, "Channels={}", self.channels())?;
        writeln!(f, "Format={}", self.channel_names())?;
        writeln!(f, "Type={}", self.sample_type())
    }
}

/// Read the size and pixel layout from the file header, without decoding pixels.
pub fn read_info(path: &Path) -> ConvertResult<ImageInfo> {
    let decoder = open_reader(path)?
        .into_decoder()
        .map_err(|e| ConvertError::decode(path, e))?;
    let (width, height) = decoder.dimensions();
    Ok(ImageInfo {
        width,
        height,
        color: decoder.color_type(),
    })
}

/// Read an RGBE PNG written by this crate back into an [`RgbeImage`].
pub fn read_rgbe_png(path: &Path) -> ConvertResult<RgbeImage> {
    let rgba = open_reader(path)?
        .decode()
        .map_err(|e| ConvertError::decode(path, e))?
        .into_rgba8();
    let (width, height) = rgba.dimensions();
    RgbeImage::new(width, height, rgba.into_raw())
}
