//! # RGBE Encoder
//!
//! Packs a linear RGB float pixel into three 8-bit mantissas that share one
//! 8-bit exponent, so HDR data fits in an ordinary RGBA8 container.
//!
//! ## Encoding
//!
//! For a pixel `(r, g, b)`:
//! 1. `v = max(r, g, b)`
//! 2. `v < 1e-32` encodes as `(0, 0, 0, 0)`, the black sentinel
//! 3. `v = mantissa * 2^e` with `mantissa` in `[0.5, 1.0)`
//! 4. `s = mantissa * 256 / v`, which is exactly `256 / 2^e`
//! 5. mantissa bytes are `floor(channel * s)`, exponent byte is `e + 128`
//!
//! Decoding computes `m / 256 * 2^(E - 128)` per channel.
//!
//! ## Exponent Range
//!
//! The smallest encodable magnitude (`1e-32`, about `2^-106`) keeps `e` well
//! above `-128`. At the top of the `f32` range `e` can reach 128, which does
//! not fit the exponent byte. [`ExponentOverflow`] decides what happens then.

use crate::core::image::{FloatImage, RgbeImage};

/// Dominant channel magnitudes below this encode as black.
pub const BLACK_THRESHOLD: f32 = 1e-32;

/// Bias added to the binary exponent before it is stored.
pub const EXPONENT_BIAS: i32 = 128;

/// Largest unbiased exponent that fits the exponent byte.
pub const MAX_EXPONENT: i32 = u8::MAX as i32 - EXPONENT_BIAS;

/// What to do when a pixel's exponent exceeds [`MAX_EXPONENT`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExponentOverflow {
    /// Store `e + 128` truncated to 8 bits.
    #[default]
    Wrap,
    /// Pin the exponent to [`MAX_EXPONENT`]; mantissas saturate at 255.
    Clamp,
}

/// Split a finite, non-zero `v` into `(mantissa, e)` with `v = mantissa * 2^e`
/// and `|mantissa|` in `[0.5, 1.0)`. Zero and non-finite values come back
/// unchanged with `e = 0`.
pub fn frexp(v: f32) -> (f32, i32) {
    if v == 0.0 || !v.is_finite() {
        return (v, 0);
    }
    let bits = v.to_bits();
    let biased = ((bits >> 23) & 0xff) as i32;
    if biased == 0 {
        // subnormal: rescale into the normal range first
        let (m, e) = frexp(v * 33_554_432.0); // 2^25
        return (m, e - 25);
    }
    let mantissa = f32::from_bits((bits & 0x807f_ffff) | (126 << 23));
    (mantissa, biased - 126)
}

/// Encode one pixel with the default [`ExponentOverflow::Wrap`] policy.
#[inline]
pub fn encode_pixel(rgb: [f32; 3]) -> [u8; 4] {
    encode_pixel_with(rgb, ExponentOverflow::Wrap)
}

/// Encode one pixel.
///
/// Negative channels saturate to mantissa 0. A NaN dominant value encodes as
/// black. An infinite dominant value always takes the clamping path.
pub fn encode_pixel_with(rgb: [f32; 3], overflow: ExponentOverflow) -> [u8; 4] {
    let [r, g, b] = rgb;
    let v = r.max(g).max(b);

    // also catches NaN
    if !(v >= BLACK_THRESHOLD) {
        return [0, 0, 0, 0];
    }

    let (mantissa, e) = frexp(v);
    let clamp = v.is_infinite() || (overflow == ExponentOverflow::Clamp && e > MAX_EXPONENT);

    let (s, e) = if clamp {
        (2f32.powi(8 - MAX_EXPONENT), MAX_EXPONENT)
    } else {
        ((f64::from(mantissa) * 256.0 / f64::from(v)) as f32, e)
    };

    // float -> u8 casts truncate toward zero and saturate into [0, 255]
    [
        (r * s) as u8,
        (g * s) as u8,
        (b * s) as u8,
        (e + EXPONENT_BIAS) as u8,
    ]
}

/// True when encoding `rgb` under [`ExponentOverflow::Wrap`] would wrap the
/// exponent byte.
pub fn exponent_overflows(rgb: [f32; 3]) -> bool {
    let v = rgb[0].max(rgb[1]).max(rgb[2]);
    v >= BLACK_THRESHOLD && (v.is_infinite() || frexp(v).1 > MAX_EXPONENT)
}

/// Decode one RGBE pixel back to linear RGB.
pub fn decode_pixel(rgbe: [u8; 4]) -> [f32; 3] {
    if rgbe == [0, 0, 0, 0] {
        return [0.0, 0.0, 0.0];
    }
    // m / 256 * 2^(E - 128)
    let scale = 2f64.powi(i32::from(rgbe[3]) - EXPONENT_BIAS - 8);
    [
        (f64::from(rgbe[0]) * scale) as f32,
        (f64::from(rgbe[1]) * scale) as f32,
        (f64::from(rgbe[2]) * scale) as f32,
    ]
}

/// Encoded image plus the number of pixels whose exponent overflowed.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub image: RgbeImage,
    pub overflowed: usize,
}

/// Encode every pixel of `src`. Pixels are independent of each other.
pub fn encode_image(src: &FloatImage, overflow: ExponentOverflow) -> EncodedImage {
    let mut overflowed = 0usize;
    let pixels = src.pixels().map(|px| {
        if exponent_overflows(px) {
            overflowed += 1;
        }
        encode_pixel_with(px, overflow)
    });
    let image = RgbeImage::from_pixels(src.width(), src.height(), pixels);
    EncodedImage { image, overflowed }
}

/// Decode every pixel of `src` back to a float image.
pub fn decode_image(src: &RgbeImage) -> FloatImage {
    FloatImage::from_pixels(src.width(), src.height(), src.pixels().map(decode_pixel))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(decoded: [f32; 3], original: [f32; 3]) {
        let v = original[0].max(original[1]).max(original[2]);
        for c in 0..3 {
            let err = (decoded[c] - original[c]).abs();
            assert!(
                err <= v / 128.0,
                "channel {} of {:?} decoded as {:?}",
                c,
                original,
                decoded
            );
            assert!(decoded[c] <= original[c], "floor never rounds up");
        }
    }

    #[test]
    fn test_frexp() {
        assert_eq!(frexp(1.0), (0.5, 1));
        assert_eq!(frexp(2.0), (0.5, 2));
        assert_eq!(frexp(1.5), (0.75, 1));
        assert_eq!(frexp(0.25), (0.5, -1));
        assert_eq!(frexp(-3.0), (-0.75, 2));
        assert_eq!(frexp(0.0), (0.0, 0));

        let tiny = f32::from_bits(1); // smallest subnormal, 2^-149
        assert_eq!(frexp(tiny), (0.5, -148));

        let (m, e) = frexp(f32::MAX);
        assert!((0.5..1.0).contains(&m));
        assert_eq!(e, 128);
    }

    #[test]
    fn test_black_sentinel() {
        assert_eq!(encode_pixel([0.0, 0.0, 0.0]), [0, 0, 0, 0]);
        assert_eq!(encode_pixel([1e-33, 5e-33, 9.9e-33]), [0, 0, 0, 0]);
        assert_eq!(encode_pixel([-1.0, -2.0, 0.0]), [0, 0, 0, 0]);
        assert_eq!(decode_pixel([0, 0, 0, 0]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_negative_channel_saturates_to_zero() {
        assert_eq!(encode_pixel([1.0, -0.5, 0.25]), [128, 0, 32, 129]);
        assert_eq!(encode_pixel([-3.0, 0.0, 0.75]), [0, 0, 192, 128]);
    }

    #[test]
    fn test_sentinel_only_below_threshold() {
        let px = encode_pixel([1e-32, 0.0, 0.0]);
        assert_ne!(px, [0, 0, 0, 0]);
        assert!(px[0] >= 128);
        assert_ne!(px[3], 0);
    }

    #[test]
    fn test_nan_is_black() {
        assert_eq!(encode_pixel([f32::NAN, f32::NAN, f32::NAN]), [0, 0, 0, 0]);
        // f32::max skips a single NaN channel
        let px = encode_pixel([f32::NAN, 1.0, 0.5]);
        assert_eq!(px, [0, 128, 64, 129]);
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode_pixel([1.0, 1.0, 1.0]), [128, 128, 128, 129]);
        assert_eq!(encode_pixel([2.0, 1.0, 0.5]), [128, 64, 32, 130]);
        assert_eq!(encode_pixel([1.5, 0.75, 0.375]), [192, 96, 48, 129]);
        assert_eq!(encode_pixel([0.5, 0.0, 0.0]), [128, 0, 0, 128]);
    }

    #[test]
    fn test_dominant_mantissa_is_normalised() {
        for &v in &[1e-30f32, 3.3e-7, 0.1, 0.999, 1.0, 7.0, 65504.0, 1e30] {
            let px = encode_pixel([v, v * 0.5, 0.0]);
            assert!(px[0] >= 128, "dominant mantissa of {} is {}", v, px[0]);
        }
    }

    #[test]
    fn test_mantissa_bounds() {
        let samples = [0.0f32, 1e-20, 1e-5, 0.3, 1.0, 255.9, 256.0, 1e12, 3.0e38];
        for &r in &samples {
            for &g in &samples {
                for &b in &samples {
                    if r.max(g).max(b) < BLACK_THRESHOLD {
                        continue;
                    }
                    let px = encode_pixel([r, g, b]);
                    assert!(px[..3].iter().any(|&m| m >= 128));
                }
            }
        }
    }

    #[test]
    fn test_round_trip_precision() {
        let triples = [
            [1e-10f32, 5e-11, 2.5e-11],
            [1.0, 0.5, 0.25],
            [0.7, 0.9, 0.1],
            [3.14159, 2.71828, 1.41421],
            [1e10, 3e9, 7e9],
            [1234.5, 0.001, 999.0],
        ];
        for rgb in triples {
            assert_close(decode_pixel(encode_pixel(rgb)), rgb);
        }
    }

    #[test]
    fn test_exponent_byte_tracks_magnitude() {
        assert_eq!(encode_pixel([1e-10, 0.0, 0.0])[3], (128 - 33) as u8);
        assert_eq!(encode_pixel([1e10, 0.0, 0.0])[3], (128 + 34) as u8);
    }

    #[test]
    fn test_exponent_wraps_by_default() {
        let rgb = [2.0e38f32, 1.0e38, 0.0];
        assert!(exponent_overflows(rgb));
        let px = encode_pixel(rgb);
        assert_eq!(px[3], 0, "e = 128 wraps to 0");
        assert!(px[0] >= 128);
    }

    #[test]
    fn test_exponent_clamps_when_asked() {
        let rgb = [2.0e38f32, 1.0e38, 0.0];
        let px = encode_pixel_with(rgb, ExponentOverflow::Clamp);
        assert_eq!(px[3], 255);
        assert_eq!(px[0], 255);
        assert_eq!(px[2], 0);
    }

    #[test]
    fn test_clamp_leaves_in_range_values_alone() {
        let rgb = [3.0f32, 2.0, 1.0];
        assert!(!exponent_overflows(rgb));
        assert_eq!(
            encode_pixel_with(rgb, ExponentOverflow::Clamp),
            encode_pixel_with(rgb, ExponentOverflow::Wrap)
        );
    }

    #[test]
    fn test_infinity_saturates() {
        let px = encode_pixel([f32::INFINITY, 1.0, 0.0]);
        assert_eq!(px, [255, 0, 0, 255]);
    }

    #[test]
    fn test_encode_image_counts_overflow() {
        let mut data = vec![1.0f32; 2 * 2 * 3];
        data[0] = 3.0e38;
        let src = FloatImage::new(2, 2, data).unwrap();

        let encoded = encode_image(&src, ExponentOverflow::Wrap);
        assert_eq!(encoded.overflowed, 1);
        assert_eq!(encoded.image.size(), src.size());
        assert_eq!(encoded.image.pixel(1, 1), Some([128, 128, 128, 129]));
    }

    #[test]
    fn test_decode_image() {
        let src = FloatImage::filled(3, 2, [1.5, 0.75, 0.375]);
        let decoded = decode_image(&encode_image(&src, ExponentOverflow::Wrap).image);
        assert_eq!(decoded, src);
    }
}
