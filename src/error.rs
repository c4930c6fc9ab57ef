//! # Error Handling
//!
//! Structured errors for the RGBE conversion library. Every variant carries an
//! [`ErrorContext`] holding the operation in progress, a recovery
//! suggestion and key/value metadata (typically the file path).
//!
//! ## Categories
//!
//! - `config`: invalid command-line or configuration values
//! - `validation`: internal size or buffer invariants violated
//! - `decode`: the input image could not be opened or decoded
//! - `resample`: the Gaussian resampler rejected the request
//! - `save`: an output PNG could not be written
//! - `io`: any other filesystem failure
//!
//! No error is retried: each one ends the current run.
//!
//! ## Usage
//!
//! ```rust
//! use hdr2rgbe::error::{ConvertError, HasRecoverySuggestion};
//!
//! let error = ConvertError::config("min_dimension", "0", "must be greater than 0")
//!     .with_operation("parse arguments")
//!     .with_recovery_suggestion("pass -m with a positive pixel count");
//!
//! assert_eq!(error.category(), "config");
//! assert!(error.recovery_suggestion().is_some());
//! ```

use std::{collections::HashMap, error::Error as StdError, fmt, path::Path};

use rgbe_scale::cpu::ScaleError;

/// Metadata about where and why an error occurred
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The operation being performed when the error occurred
    pub operation: Option<String>,
    /// Suggested recovery action
    pub recovery_suggestion: Option<String>,
    /// Additional metadata as key-value pairs
    pub metadata: HashMap<String, String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.recovery_suggestion = Some(suggestion.into());
        self
    }
}

/// Base error type for the conversion library
#[derive(Debug)]
pub enum ConvertError {
    /// Configuration validation errors
    Config {
        field: String,
        value: String,
        reason: String,
        context: ErrorContext,
    },
    /// Size or buffer invariants
    Validation {
        field: String,
        constraint: String,
        value: String,
        context: ErrorContext,
    },
    /// Input image could not be read or decoded
    Decode {
        path: String,
        source: image::ImageError,
        context: ErrorContext,
    },
    /// Resampling failures
    Resample {
        target: String,
        source: ScaleError,
        context: ErrorContext,
    },
    /// Output image could not be encoded or written
    Save {
        path: String,
        source: image::ImageError,
        context: ErrorContext,
    },
    /// I/O errors
    Io {
        operation: String,
        path: Option<String>,
        source: std::io::Error,
        context: ErrorContext,
    },
}

impl ConvertError {
    /// Create a configuration error
    pub fn config(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Config {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a validation error
    pub fn validation(
        field: impl Into<String>,
        constraint: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field: field.into(),
            constraint: constraint.into(),
            value: value.into(),
            context: ErrorContext::new(),
        }
    }

    /// Create a decode error for the input at `path`
    pub fn decode(path: &Path, source: image::ImageError) -> Self {
        Self::Decode {
            path: path.display().to_string(),
            source,
            context: ErrorContext::new()
                .with_recovery_suggestion("check that the input exists and is an HDR/EXR image"),
        }
    }

    /// Create a resample error for the given target description
    pub fn resample(target: impl Into<String>, source: ScaleError) -> Self {
        Self::Resample {
            target: target.into(),
            source,
            context: ErrorContext::new(),
        }
    }

    /// Create a save error for the output at `path`
    pub fn save(path: &Path, source: image::ImageError) -> Self {
        Self::Save {
            path: path.display().to_string(),
            source,
            context: ErrorContext::new()
                .with_recovery_suggestion("check that the output directory exists and is writable"),
        }
    }

    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            path: None,
            source,
            context: ErrorContext::new(),
        }
    }

    /// Attach a path to an I/O error; other variants record it as metadata
    pub fn with_path(mut self, path: &Path) -> Self {
        let shown = path.display().to_string();
        if let Self::Io { path: io_path, .. } = &mut self {
            *io_path = Some(shown);
        } else {
            self.context_mut().metadata.insert("path".into(), shown);
        }
        self
    }

    /// Add operation context
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    /// Add recovery suggestion
    pub fn with_recovery_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.context_mut().recovery_suggestion = Some(suggestion.into());
        self
    }

    /// Add metadata
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context_mut().metadata.insert(key.into(), value.into());
        self
    }

    /// Get the error context
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Config { context, .. } => context,
            Self::Validation { context, .. } => context,
            Self::Decode { context, .. } => context,
            Self::Resample { context, .. } => context,
            Self::Save { context, .. } => context,
            Self::Io { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::Config { context, .. } => context,
            Self::Validation { context, .. } => context,
            Self::Decode { context, .. } => context,
            Self::Resample { context, .. } => context,
            Self::Save { context, .. } => context,
            Self::Io { context, .. } => context,
        }
    }

    /// Get the error category as a string
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Validation { .. } => "validation",
            Self::Decode { .. } => "decode",
            Self::Resample { .. } => "resample",
            Self::Save { .. } => "save",
            Self::Io { .. } => "io",
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Config {
                field,
                value,
                reason,
                ..
            } => {
                write!(
                    f,
                    "Configuration error in '{}': {} (value: {})",
                    field, reason, value
                )
            }
            ConvertError::Validation {
                field,
                constraint,
                value,
                ..
            } => {
                write!(
                    f,
                    "Validation failed for '{}': {} (value: {})",
                    field, constraint, value
                )
            }
            ConvertError::Decode { path, source, .. } => {
                write!(f, "Failed to decode '{}': {}", path, source)
            }
            ConvertError::Resample { target, source, .. } => {
                write!(f, "Resampling to {} failed: {}", target, source)
            }
            ConvertError::Save { path, source, .. } => {
                write!(f, "Failed to save '{}': {}", path, source)
            }
            ConvertError::Io {
                operation,
                path,
                source,
                ..
            } => {
                if let Some(path) = path {
                    write!(
                        f,
                        "I/O error during {} on '{}': {}",
                        operation, path, source
                    )
                } else {
                    write!(f, "I/O error during {}: {}", operation, source)
                }
            }
        }
    }
}

impl StdError for ConvertError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::Resample { source, .. } => Some(source),
            Self::Save { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Result type alias using our custom error type
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Trait for errors that provide recovery suggestions
pub trait HasRecoverySuggestion {
    /// Get recovery suggestion for this error
    fn recovery_suggestion(&self) -> Option<&str>;
}

impl HasRecoverySuggestion for ConvertError {
    fn recovery_suggestion(&self) -> Option<&str> {
        self.context().recovery_suggestion.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_creation() {
        let error = ConvertError::config("min_dimension", "0", "must be greater than 0");
        assert_eq!(error.category(), "config");
        assert_eq!(
            error.to_string(),
            "Configuration error in 'min_dimension': must be greater than 0 (value: 0)"
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_with_context() {
        let error = ConvertError::validation("width", "must be positive", "0")
            .with_operation("fixed-size resize")
            .with_recovery_suggestion("pass -w with a positive value")
            .with_metadata("input", "sky.exr");

        assert_eq!(error.category(), "validation");
        assert_eq!(error.context().operation.as_deref(), Some("fixed-size resize"));
        assert_eq!(error.context().metadata.get("input").map(String::as_str), Some("sky.exr"));
        assert_eq!(
            error.recovery_suggestion(),
            Some("pass -w with a positive value")
        );
    }

    #[test]
    fn test_io_error_path() {
        let source = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = ConvertError::io("open input", source).with_path(&PathBuf::from("in.hdr"));
        assert_eq!(error.category(), "io");
        assert_eq!(error.to_string(), "I/O error during open input on 'in.hdr': missing");
        assert!(error.source().is_some());
    }

    #[test]
    fn test_path_metadata_for_other_variants() {
        let error = ConvertError::config("output", "", "must not be empty")
            .with_path(&PathBuf::from("out"));
        assert_eq!(error.context().metadata.get("path").map(String::as_str), Some("out"));
    }

    #[test]
    fn test_decode_error_suggests_recovery() {
        let source = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        let error = ConvertError::decode(&PathBuf::from("missing.exr"), source);
        assert_eq!(error.category(), "decode");
        assert!(error.to_string().contains("missing.exr"));
        assert!(error.recovery_suggestion().is_some());
    }

    #[test]
    fn test_resample_error_wraps_scale_error() {
        let error = ConvertError::resample("0x4", ScaleError::InvalidFilter("bad support".into()))
            .with_operation("resample step");
        assert_eq!(error.category(), "resample");
        assert_eq!(error.context().operation.as_deref(), Some("resample step"));
        assert!(error.source().is_some());
    }
}
