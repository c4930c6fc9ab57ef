//! # Configuration Module
//!
//! Configuration structures and validation for RGBE conversion runs. This is
//! the common interface between the command line and the conversion library.
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Range | Description |
//! |-----------|------|-------|-------------|
//! | `input` | `String` | Any readable image | Source HDR image |
//! | `output` | `String` | Any writable path | Exact file name, or prefix in power-of-two mode |
//! | `mode` | `Mode` | see below | Which outputs to produce |
//! | `overflow` | `ExponentOverflow` | wrap / clamp | Exponent overflow policy |
//!
//! ## Modes
//!
//! - `PowerOfTwo { min_dimension }`: one `<output>_<w>x<h>.png` per ladder rung
//! - `Fixed { width, height }`: one PNG at exactly that size, named `output`
//! - `Info`: print the input header and exit
//!
//! ## Examples
//!
//! ```rust
//! use hdr2rgbe::config::config::{ConvertConfig, Mode};
//! use hdr2rgbe::processing::ExponentOverflow;
//!
//! let config = ConvertConfig::new(
//!     "sky.exr".to_string(),
//!     "sky".to_string(),
//!     Mode::PowerOfTwo { min_dimension: 128 },
//!     ExponentOverflow::Wrap,
//! );
//!
//! assert!(config.validate().is_ok());
//! let options = config.to_convert_options().unwrap();
//! assert_eq!(options.output, "sky");
//! ```

use std::path::PathBuf;

use rgbe_scale::ladder::{ScaleTarget, Size};

use crate::error::{ConvertError, ConvertResult};
use crate::processing::rgbe::ExponentOverflow;

/// Which outputs a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Power-of-two ladder down to `min_dimension` pixels per side.
    PowerOfTwo { min_dimension: u32 },
    /// Single output at an explicit size.
    Fixed { width: u32, height: u32 },
    /// Print input metadata only.
    Info,
}

/// Configuration structure for a conversion run.
///
/// # Examples
///
/// ```rust
/// use hdr2rgbe::config::config::{ConvertConfig, Mode};
/// use hdr2rgbe::processing::ExponentOverflow;
///
/// let config = ConvertConfig {
///     input: "probe.hdr".to_string(),
///     output: "probe_small.png".to_string(),
///     mode: Mode::Fixed { width: 300, height: 150 },
///     overflow: ExponentOverflow::Clamp,
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Source image path.
    pub input: String,

    /// Output file name (fixed mode) or file name prefix (power-of-two mode).
    ///
    /// Unused in info mode.
    pub output: String,

    /// Which outputs to produce.
    pub mode: Mode,

    /// What to do with exponents that do not fit the exponent byte.
    pub overflow: ExponentOverflow,
}

impl Default for ConvertConfig {
    /// Default values:
    /// - `input`: "input.hdr"
    /// - `output`: "out"
    /// - `mode`: power-of-two down to 128 pixels
    /// - `overflow`: wrap
    fn default() -> Self {
        Self {
            input: "input.hdr".to_string(),
            output: "out".to_string(),
            mode: Mode::PowerOfTwo { min_dimension: 128 },
            overflow: ExponentOverflow::Wrap,
        }
    }
}

impl ConvertConfig {
    pub fn new(input: String, output: String, mode: Mode, overflow: ExponentOverflow) -> Self {
        Self {
            input,
            output,
            mode,
            overflow,
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.input.is_empty() {
            return Err("Input path must not be empty".to_string());
        }
        match self.mode {
            Mode::Info => return Ok(()),
            Mode::PowerOfTwo { min_dimension } => {
                if min_dimension == 0 {
                    return Err("Minimum dimension must be greater than 0".to_string());
                }
            }
            Mode::Fixed { width, height } => {
                if width == 0 || height == 0 {
                    return Err("Width and height must both be greater than 0".to_string());
                }
            }
        }
        if self.output.is_empty() {
            return Err("Output path must not be empty".to_string());
        }
        Ok(())
    }

    /// Convert to ConvertOptions for use with the conversion library.
    ///
    /// Info mode has nothing to convert and yields an error.
    pub fn to_convert_options(&self) -> ConvertResult<crate::ConvertOptions> {
        let target = match self.mode {
            Mode::PowerOfTwo { min_dimension } => ScaleTarget::PowerOfTwo { min_dimension },
            Mode::Fixed { width, height } => ScaleTarget::Exact(Size::new(width, height)),
            Mode::Info => {
                return Err(ConvertError::config("mode", "info", "info mode does not produce outputs")
                    .with_recovery_suggestion("pass -m, or -w and -h, instead of -p"));
            }
        };
        Ok(crate::ConvertOptions {
            input: PathBuf::from(&self.input),
            output: self.output.clone(),
            target,
            overflow: self.overflow,
        })
    }
}
