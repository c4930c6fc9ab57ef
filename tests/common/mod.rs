//! Common test utilities shared by the integration tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{Rgb, Rgb32FImage, RgbaImage};

/// Write a `width x height` OpenEXR image with every pixel set to `rgb`.
pub fn write_uniform_exr(dir: &Path, name: &str, width: u32, height: u32, rgb: [f32; 3]) -> PathBuf {
    let path = dir.join(name);
    let img = Rgb32FImage::from_pixel(width, height, Rgb(rgb));
    img.save(&path).expect("write test EXR");
    path
}

/// Write a horizontal gradient so resampling has something to smooth.
pub fn write_gradient_exr(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let img = Rgb32FImage::from_fn(width, height, |x, _| {
        let t = x as f32 / width as f32;
        Rgb([4.0 * t, 2.0 * t, 0.5 + t])
    });
    img.save(&path).expect("write test EXR");
    path
}

/// Load a PNG as 8-bit RGBA.
pub fn read_rgba(path: &Path) -> RgbaImage {
    image::open(path).expect("open output PNG").into_rgba8()
}

/// Every pixel shares `expected`'s exponent and is within one mantissa step of it.
pub fn assert_uniform_rgbe(img: &RgbaImage, expected: [u8; 4]) {
    for (x, y, px) in img.enumerate_pixels() {
        assert_eq!(px.0[3], expected[3], "exponent at ({}, {})", x, y);
        for c in 0..3 {
            let diff = (i32::from(px.0[c]) - i32::from(expected[c])).abs();
            assert!(diff <= 1, "channel {} at ({}, {}): {:?} vs {:?}", c, x, y, px.0, expected);
        }
    }
}
