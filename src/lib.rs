//! # hdr2rgbe
//!
//! Converts a high-dynamic-range float image into RGBE-encoded 8-bit RGBA PNGs,
//! either at one explicit size or at every power-of-two size from the largest
//! one that fits the source down to a minimum.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//! - `core`: pixel buffers (`FloatImage`, `RgbeImage`)
//! - `processing`: the RGBE encoder and the resample + encode step pipeline
//! - `imageio`: decoding inputs, reading headers, writing PNG outputs
//! - `config`: run configuration and validation
//! - `error`: structured error types
//!
//! Sizes, the power-of-two ladder and the Gaussian resampler live in the
//! `rgbe-scale` crate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hdr2rgbe::{ConvertOptions, convert};
//! use hdr2rgbe::processing::ExponentOverflow;
//! use rgbe_scale::ladder::ScaleTarget;
//!
//! # fn example() -> anyhow::Result<()> {
//! let options = ConvertOptions {
//!     input: "sky.exr".into(),
//!     output: "sky".to_string(),
//!     target: ScaleTarget::PowerOfTwo { min_dimension: 128 },
//!     overflow: ExponentOverflow::Wrap,
//! };
//!
//! // writes sky_1024x512.png, sky_512x256.png, sky_256x128.png, ...
//! let written = convert(&options)?;
//! # Ok(())
//! # }
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use rgbe_scale::cpu::GaussianFilter;
use rgbe_scale::ladder::{Pow2Ladder, ScaleTarget, Size};

pub mod config;
pub mod core;
pub mod error;
pub mod imageio;
pub mod processing;

/// Re-export error types for convenience
pub use error::{ConvertError, ConvertResult, HasRecoverySuggestion};

use crate::core::image::FloatImage;
use crate::imageio::{ImageInfo, PngFileSink, RgbeSink, decode_float_image, read_info};
use crate::processing::{ExponentOverflow, RgbePipeline};

/// Options for one conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Source image.
    pub input: PathBuf,

    /// Output file name for an exact target, or file name prefix for the
    /// power-of-two ladder.
    pub output: String,

    /// Which sizes to produce.
    pub target: ScaleTarget,

    /// Exponent overflow policy for the encoder.
    pub overflow: ExponentOverflow,
}

/// File name of one ladder rung: `<prefix>_<width>x<height>.png`.
pub fn step_path(prefix: &str, size: Size) -> PathBuf {
    PathBuf::from(format!("{}_{}x{}.png", prefix, size.w, size.h))
}

/// Decode `options.input`, then write every requested size as an RGBE PNG.
///
/// Ladder file names are reported on standard output, one line per step.
/// Returns the paths written, in order.
///
/// # Errors
///
/// Returns an error if:
/// - the input cannot be opened or decoded
/// - a resample fails (e.g. a zero-sized target)
/// - an output PNG cannot be written
///
/// The first failure stops the run; later steps are not attempted.
pub fn convert(options: &ConvertOptions) -> Result<Vec<PathBuf>> {
    let stdout = std::io::stdout();
    let mut report = stdout.lock();
    convert_with(options, &mut report, &mut PngFileSink)
}

/// [`convert`] with an explicit report writer and output sink.
pub fn convert_with<W: Write, S: RgbeSink>(
    options: &ConvertOptions,
    report: &mut W,
    sink: &mut S,
) -> Result<Vec<PathBuf>> {
    let source = decode_float_image(&options.input)
        .with_context(|| format!("reading input {}", options.input.display()))?;
    info!("source {} is {}", options.input.display(), source.size());

    let filter = GaussianFilter::new().context("building the resampling filter")?;
    render(&source, options, &filter, report, sink)
}

/// Run every step of `options.target` against an already decoded source.
///
/// In ladder mode the file name of each step is written to `report` and
/// flushed before the step runs, and the line is terminated once the step's
/// file has been written. Exact targets report nothing.
pub fn render<W: Write, S: RgbeSink>(
    source: &FloatImage,
    options: &ConvertOptions,
    filter: &GaussianFilter,
    report: &mut W,
    sink: &mut S,
) -> Result<Vec<PathBuf>> {
    let mut pipeline = RgbePipeline::new(filter, options.overflow);
    let mut written = Vec::new();

    match options.target {
        ScaleTarget::PowerOfTwo { min_dimension } => {
            for size in Pow2Ladder::new(source.size(), min_dimension) {
                let path = step_path(&options.output, size);
                write!(report, "{}", path.display())?;
                report.flush()?;

                info!("step {}", size);
                let rgbe = pipeline
                    .process_step(source, size)
                    .with_context(|| format!("processing step {}", size))?;
                sink.write(&path, &rgbe)
                    .map_err(|e| e.with_metadata("step", size.to_string()))?;

                writeln!(report)?;
                written.push(path);
            }
            if written.is_empty() {
                warn!("source {} has no power-of-two size, nothing written", source.size());
            }
        }
        ScaleTarget::Exact(size) => {
            let path = PathBuf::from(&options.output);
            info!("resizing to {}", size);
            let rgbe = pipeline
                .process_step(source, size)
                .with_context(|| format!("resizing to {}", size))?;
            sink.write(&path, &rgbe)
                .map_err(|e| e.with_metadata("step", size.to_string()))?;
            written.push(path);
        }
    }

    Ok(written)
}

/// Write the header summary of `path` to `out`.
pub fn write_info<W: Write>(path: &Path, out: &mut W) -> Result<ImageInfo> {
    let info = read_info(path).with_context(|| format!("reading header of {}", path.display()))?;
    write!(out, "{}", info)?;
    Ok(info)
}

/// Print the header summary of `path` on standard output.
pub fn print_info(path: &Path) -> Result<ImageInfo> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_info(path, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imageio::MemorySink;
    use crate::processing::encode_pixel;

    fn options(target: ScaleTarget, output: &str) -> ConvertOptions {
        ConvertOptions {
            input: PathBuf::from("unused.exr"),
            output: output.to_string(),
            target,
            overflow: ExponentOverflow::Wrap,
        }
    }

    #[test]
    fn test_step_path() {
        assert_eq!(step_path("out/sky", Size::new(512, 256)), PathBuf::from("out/sky_512x256.png"));
    }

    #[test]
    fn test_render_ladder_reports_each_step() {
        let source = FloatImage::filled(100, 60, [1.5, 0.75, 0.375]);
        let filter = GaussianFilter::new().unwrap();
        let mut report = Vec::new();
        let mut sink = MemorySink::new();

        let written = render(
            &source,
            &options(ScaleTarget::PowerOfTwo { min_dimension: 10 }, "t"),
            &filter,
            &mut report,
            &mut sink,
        )
        .unwrap();

        assert_eq!(
            written,
            vec![
                PathBuf::from("t_64x32.png"),
                PathBuf::from("t_32x16.png"),
            ]
        );
        assert_eq!(String::from_utf8(report).unwrap(), "t_64x32.png\nt_32x16.png\n");
        assert_eq!(sink.written.len(), 2);
        assert_eq!(sink.written[1].1.size(), Size::new(32, 16));
    }

    #[test]
    fn test_render_ladder_below_minimum_still_writes_once() {
        let source = FloatImage::filled(100, 60, [1.0, 1.0, 1.0]);
        let filter = GaussianFilter::new().unwrap();
        let mut report = Vec::new();
        let mut sink = MemorySink::new();

        let written = render(
            &source,
            &options(ScaleTarget::PowerOfTwo { min_dimension: 500 }, "t"),
            &filter,
            &mut report,
            &mut sink,
        )
        .unwrap();

        assert_eq!(written, vec![PathBuf::from("t_64x32.png")]);
    }

    #[test]
    fn test_render_exact_uses_output_name() {
        let rgb = [1.5, 0.75, 0.375];
        let source = FloatImage::filled(90, 45, rgb);
        let filter = GaussianFilter::new().unwrap();
        let mut report = Vec::new();
        let mut sink = MemorySink::new();

        let written = render(
            &source,
            &options(ScaleTarget::Exact(Size::new(30, 20)), "exact.png"),
            &filter,
            &mut report,
            &mut sink,
        )
        .unwrap();

        assert_eq!(written, vec![PathBuf::from("exact.png")]);
        assert!(report.is_empty());
        let (_, image) = &sink.written[0];
        assert_eq!(image.size(), Size::new(30, 20));
        assert!(image.pixels().all(|px| px[3] == encode_pixel(rgb)[3]));
    }

    struct FailingSink;

    impl RgbeSink for FailingSink {
        fn write(&mut self, path: &Path, _image: &crate::core::image::RgbeImage) -> ConvertResult<()> {
            let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
            Err(ConvertError::save(path, image::ImageError::IoError(source)))
        }
    }

    #[test]
    fn test_save_failure_records_step() {
        let source = FloatImage::filled(16, 16, [1.0, 1.0, 1.0]);
        let filter = GaussianFilter::new().unwrap();
        let mut report = Vec::new();

        let err = render(
            &source,
            &options(ScaleTarget::PowerOfTwo { min_dimension: 1 }, "t"),
            &filter,
            &mut report,
            &mut FailingSink,
        )
        .unwrap_err();

        let cause = err.downcast_ref::<ConvertError>().unwrap();
        assert_eq!(cause.category(), "save");
        assert_eq!(cause.context().metadata.get("step").map(String::as_str), Some("16x16"));
        assert_eq!(String::from_utf8(report).unwrap(), "t_16x16.png");
    }

    #[test]
    fn test_missing_input_fails() {
        let mut report = Vec::new();
        let mut sink = MemorySink::new();
        let opts = ConvertOptions {
            input: PathBuf::from("/nonexistent/input.exr"),
            ..options(ScaleTarget::PowerOfTwo { min_dimension: 1 }, "t")
        };
        assert!(convert_with(&opts, &mut report, &mut sink).is_err());
        assert!(sink.written.is_empty());
    }
}
