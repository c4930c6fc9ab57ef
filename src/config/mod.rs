//! # Configuration Module
//!
//! This module provides the run configuration shared by the CLI and the library.

pub mod config;

pub use config::{ConvertConfig, Mode};
