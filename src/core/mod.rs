//! # Core Module
//!
//! Pixel buffer types shared by every stage of a conversion.

pub mod image;

pub use image::{FloatImage, RgbeImage};
