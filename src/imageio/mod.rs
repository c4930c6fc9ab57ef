//! # Image I/O Module
//!
//! Reading HDR inputs and writing RGBE PNG outputs through the `image` crate.

pub mod read;
pub mod write;

pub use read::{ImageInfo, decode_float_image, read_info, read_rgbe_png};
pub use write::{MemorySink, PngFileSink, RgbeSink};
