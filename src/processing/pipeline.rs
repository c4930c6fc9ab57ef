//! # Step Pipeline
//!
//! One resolution step is: resample the source to the step size, then RGBE
//! encode the result. The pipeline owns the reusable resizer scratch state
//! and borrows the run-wide filter configuration, so the filter is built
//! exactly once no matter how many steps run.

use fast_image_resize::Resizer;
use log::{debug, warn};
use rgbe_scale::cpu::{GaussianFilter, resample_rgb_f32_cpu};
use rgbe_scale::ladder::Size;

use crate::core::image::{FloatImage, RgbeImage};
use crate::error::{ConvertError, ConvertResult};
use crate::processing::rgbe::{ExponentOverflow, encode_image};

/// Resample + encode stage chain.
pub struct RgbePipeline<'f> {
    filter: &'f GaussianFilter,
    resizer: Resizer,
    overflow: ExponentOverflow,
}

impl<'f> RgbePipeline<'f> {
    pub fn new(filter: &'f GaussianFilter, overflow: ExponentOverflow) -> Self {
        Self {
            filter,
            resizer: Resizer::new(),
            overflow,
        }
    }

    /// Resample `src` to `target` with the Gaussian filter.
    pub fn resize(&mut self, src: &FloatImage, target: Size) -> ConvertResult<FloatImage> {
        let data = resample_rgb_f32_cpu(
            &mut self.resizer,
            src.as_slice(),
            src.size(),
            target,
            self.filter,
        )
        .map_err(|e| ConvertError::resample(target.to_string(), e).with_operation("resample step"))?;
        FloatImage::new(target.w, target.h, data)
    }

    /// RGBE encode `src` under this pipeline's overflow policy.
    pub fn encode(&self, src: &FloatImage) -> RgbeImage {
        let encoded = encode_image(src, self.overflow);
        if encoded.overflowed > 0 {
            match self.overflow {
                ExponentOverflow::Wrap => warn!(
                    "{} pixel(s) exceed the exponent range at {} and wrapped",
                    encoded.overflowed,
                    src.size()
                ),
                ExponentOverflow::Clamp => debug!(
                    "{} pixel(s) clamped to the largest exponent at {}",
                    encoded.overflowed,
                    src.size()
                ),
            }
        }
        encoded.image
    }

    /// Run one full step: resample to `target`, then encode.
    pub fn process_step(&mut self, src: &FloatImage, target: Size) -> ConvertResult<RgbeImage> {
        debug!("resampling {} -> {}", src.size(), target);
        let resized = self.resize(src, target)?;
        Ok(self.encode(&resized))
    }
}
