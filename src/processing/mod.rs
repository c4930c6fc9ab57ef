//! # Processing Module
//!
//! The per-step work of a conversion: Gaussian resampling followed by RGBE encoding.

pub mod pipeline;
pub mod rgbe;

// Re-export commonly used types for convenience
pub use pipeline::RgbePipeline;
pub use rgbe::{ExponentOverflow, decode_pixel, encode_image, encode_pixel, encode_pixel_with};
