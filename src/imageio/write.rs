//! Output destinations for encoded RGBE images.

use std::path::{Path, PathBuf};

use image::{ColorType, ImageFormat};
use log::info;

use crate::core::image::RgbeImage;
use crate::error::{ConvertError, ConvertResult};

/// Abstract output interface.
/// Implement this trait to send encoded images somewhere other than disk.
pub trait RgbeSink {
    /// Store `image` under `path`.
    fn write(&mut self, path: &Path, image: &RgbeImage) -> ConvertResult<()>;
}

/// Writes each image as an 8-bit RGBA PNG.
///
/// The exponent byte lands in the alpha channel. PNG alpha is always straight
/// (unassociated), so colour bytes are stored untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngFileSink;

impl RgbeSink for PngFileSink {
    fn write(&mut self, path: &Path, image: &RgbeImage) -> ConvertResult<()> {
        image::save_buffer_with_format(
            path,
            image.as_bytes(),
            image.width(),
            image.height(),
            ColorType::Rgba8,
            ImageFormat::Png,
        )
        .map_err(|e| ConvertError::save(path, e))?;
        info!("wrote {} ({})", path.display(), image.size());
        Ok(())
    }
}

/// Keeps every image in memory instead of writing files.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub written: Vec<(PathBuf, RgbeImage)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.written.iter().map(|(p, _)| p.as_path()).collect()
    }
}

impl RgbeSink for MemorySink {
    fn write(&mut self, path: &Path, image: &RgbeImage) -> ConvertResult<()> {
        self.written.push((path.to_path_buf(), image.clone()));
        Ok(())
    }
}
