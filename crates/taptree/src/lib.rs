//! taptree library
//!
//! This module exports the command-line driver of taptree for use in
//! integration tests and as a library.

pub mod config;
pub mod translate;

pub use config::{Config, ConfigError};
pub use translate::{TranslateError, TranslateStats, render, run, translate_reader};
