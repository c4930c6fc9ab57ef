// SPDX-License-Identifier: MIT
// CPU resampler built on fast_image_resize.
// Packed RGB f32 in → packed RGB f32 out, fixed Gaussian reconstruction filter.

use fast_image_resize as fir;
use fir::images::Image;
use fir::{Filter, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use log::debug;

use crate::ladder::Size;

/// Support radius of the reconstruction filter, in source pixels (both axes).
pub const GAUSSIAN_RADIUS: f64 = 2.0;

const CHANNELS: usize = 3;
const BYTES_PER_SAMPLE: usize = std::mem::size_of::<f32>();

#[derive(Debug)]
pub enum ScaleError {
    EmptyImage(Size),
    BufferSizeMismatch { expected: usize, actual: usize },
    InvalidFilter(String),
    Fir(fir::ResizeError),
    ImageBuf(fir::ImageBufferError),
}

impl From<fir::ResizeError> for ScaleError { fn from(e: fir::ResizeError) -> Self { Self::Fir(e) } }
impl From<fir::ImageBufferError> for ScaleError { fn from(e: fir::ImageBufferError) -> Self { Self::ImageBuf(e) } }

impl std::fmt::Display for ScaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleError::EmptyImage(size) => write!(f, "Cannot resample an empty image ({})", size),
            ScaleError::BufferSizeMismatch { expected, actual } => {
                write!(f, "Source buffer holds {} samples, expected {}", actual, expected)
            }
            ScaleError::InvalidFilter(e) => write!(f, "Invalid reconstruction filter: {}", e),
            ScaleError::Fir(e) => write!(f, "Fast image resize error: {}", e),
            ScaleError::ImageBuf(e) => write!(f, "Image buffer error: {}", e),
        }
    }
}

impl std::error::Error for ScaleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaleError::Fir(e) => Some(e),
            ScaleError::ImageBuf(e) => Some(e),
            _ => None,
        }
    }
}

/// Gaussian with sigma 1, truncated at [`GAUSSIAN_RADIUS`].
/// fast_image_resize normalises the weights, so no scale factor is needed.
fn gaussian_r2(x: f64) -> f64 {
    if x.abs() < GAUSSIAN_RADIUS {
        (-0.5 * x * x).exp()
    } else {
        0.0
    }
}

/// Resize configuration shared by every resample call of a run.
///
/// Build once at startup and pass by reference; it is never mutated.
pub struct GaussianFilter {
    options: ResizeOptions,
}

impl GaussianFilter {
    pub fn new() -> Result<Self, ScaleError> {
        let filter = Filter::new("gaussian", gaussian_r2, GAUSSIAN_RADIUS)
            .map_err(|e| ScaleError::InvalidFilter(format!("{:?}", e)))?;
        debug!("built gaussian reconstruction filter, support radius {}", GAUSSIAN_RADIUS);
        Ok(Self {
            options: ResizeOptions::new()
                .resize_alg(ResizeAlg::Convolution(FilterType::Custom(filter))),
        })
    }

    pub fn options(&self) -> &ResizeOptions {
        &self.options
    }
}

/// Resample a packed RGB `f32` buffer from `src` to `dst` size.
///
/// `src_rgb` must hold exactly `src.w * src.h * 3` samples. Returns a new
/// packed buffer of `dst.w * dst.h * 3` samples. No transfer function is
/// applied: values stay linear.
pub fn resample_rgb_f32_cpu(
    resizer: &mut Resizer,
    src_rgb: &[f32],
    src: Size,
    dst: Size,
    filter: &GaussianFilter,
) -> Result<Vec<f32>, ScaleError> {
    if src.is_empty() {
        return Err(ScaleError::EmptyImage(src));
    }
    if dst.is_empty() {
        return Err(ScaleError::EmptyImage(dst));
    }
    let expected = src.area() * CHANNELS;
    if src_rgb.len() != expected {
        return Err(ScaleError::BufferSizeMismatch {
            expected,
            actual: src_rgb.len(),
        });
    }

    let src_bytes: Vec<u8> = src_rgb.iter().flat_map(|v| v.to_ne_bytes()).collect();
    let src_image = Image::from_vec_u8(src.w, src.h, src_bytes, PixelType::F32x3)?;
    let mut dst_image = Image::new(dst.w, dst.h, PixelType::F32x3);

    resizer.resize(&src_image, &mut dst_image, filter.options())?;

    Ok(unpack_f32(dst_image.buffer()))
}

#[inline]
fn unpack_f32(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(BYTES_PER_SAMPLE)
        .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
        .collect()
}
