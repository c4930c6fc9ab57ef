// SPDX-License-Identifier: MIT
//! # rgbe-scale: Resolution Ladders and Float Resampling
//!
//! This crate provides the two size-related stages of the RGBE export pipeline:
//! deciding which resolutions to produce, and resampling linear float RGB data
//! to each of them.
//!
//! ## Key Components
//!
//! - [`ladder`]: `Size`, scale targets and the lazy power-of-two resolution ladder
//! - [`cpu`]: CPU resampling of packed `f32` RGB buffers using fast_image_resize
//!
//! ## Resolution Ladder
//!
//! The ladder starts at the largest power of two not exceeding each source axis
//! and halves both axes until either would fall below a minimum. The first step
//! is always produced, even when it is already below the minimum.
//!
//! ```rust
//! use rgbe_scale::ladder::{Pow2Ladder, Size};
//!
//! let steps: Vec<Size> = Pow2Ladder::new(Size { w: 1000, h: 600 }, 100).collect();
//! assert_eq!(steps, vec![
//!     Size { w: 512, h: 512 },
//!     Size { w: 256, h: 256 },
//!     Size { w: 128, h: 128 },
//! ]);
//! ```
//!
//! ## Resampling
//!
//! Resampling always uses the same Gaussian reconstruction filter (support
//! radius 2). The filter is built once into a [`cpu::GaussianFilter`] and
//! borrowed by every resize call.
//!
//! ```rust,no_run
//! use rgbe_scale::cpu::{resample_rgb_f32_cpu, GaussianFilter};
//! use rgbe_scale::ladder::Size;
//!
//! # fn main() -> Result<(), rgbe_scale::cpu::ScaleError> {
//! let filter = GaussianFilter::new()?;
//! let mut resizer = fast_image_resize::Resizer::new();
//! let src = vec![1.0f32; 64 * 64 * 3];
//! let out = resample_rgb_f32_cpu(
//!     &mut resizer,
//!     &src,
//!     Size { w: 64, h: 64 },
//!     Size { w: 16, h: 16 },
//!     &filter,
//! )?;
//! assert_eq!(out.len(), 16 * 16 * 3);
//! # Ok(())
//! # }
//! ```

pub mod cpu;
pub mod ladder;
