//! Configuration for the taptree command
//!
//! This module provides the command-line options, their validation, and the
//! mapping from options to translation conventions and log level.

use std::path::PathBuf;

use clap::Parser;
use taptree_parser::Conventions;

/// taptree - Turn TAP subtest reports into trees of runnable tests
///
/// Reads a TAP report (typically piped from the test runner), looks up each
/// subtest's declaration in the test sources, and writes a JSON array of
/// test trees.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "taptree")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Read the report from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write JSON to this file instead of stdout
    ///
    /// Nothing is written if translation fails.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory that test source paths are resolved against
    ///
    /// Defaults to the current working directory.
    #[arg(short, long, env = "TAPTREE_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Directory prefix of test modules in the report [default: test]
    #[arg(long, env = "TAPTREE_TEST_DIR")]
    pub test_dir: Option<String>,

    /// Test module extension [default: .test.js]
    #[arg(long, env = "TAPTREE_EXTENSION")]
    pub extension: Option<String>,

    /// Executable used to re-run tests [default: node]
    #[arg(long, env = "TAPTREE_COMMAND")]
    pub command: Option<String>,

    /// Runner entry point passed as the first argument
    /// [default: node_modules/tap/bin/run.js]
    #[arg(long, env = "TAPTREE_RUNNER")]
    pub runner: Option<String>,

    /// Emit single-line JSON instead of pretty-printed
    #[arg(long, default_value = "false")]
    pub compact: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs every test module and subtest as it is discovered. Logs are
    /// written to stderr so stdout carries only JSON.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Config {
    /// Get the workspace path, using current directory as default
    #[must_use]
    pub fn workspace_path(&self) -> PathBuf {
        self.workspace
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Build translation conventions, overriding defaults with any options given
    #[must_use]
    pub fn conventions(&self) -> Conventions {
        let mut conventions = Conventions::default();
        if let Some(ref test_dir) = self.test_dir {
            conventions = conventions.with_test_dir(test_dir);
        }
        if let Some(ref extension) = self.extension {
            conventions = conventions.with_extension(extension);
        }
        if let Some(ref command) = self.command {
            conventions = conventions.with_command(command);
        }
        if let Some(ref runner) = self.runner {
            conventions = conventions.with_runner(runner);
        }
        conventions
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The workspace path is specified but doesn't exist or isn't a directory
    /// - The input is specified but doesn't exist or is a directory
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref workspace) = self.workspace {
            if !workspace.exists() {
                return Err(ConfigError::WorkspaceNotFound(workspace.clone()));
            }
            if !workspace.is_dir() {
                return Err(ConfigError::WorkspaceNotDirectory(workspace.clone()));
            }
        }

        // Pipes and character devices are valid inputs; opening reports the rest
        if let Some(ref input) = self.input {
            if !input.exists() {
                return Err(ConfigError::InputNotFound(input.clone()));
            }
            if input.is_dir() {
                return Err(ConfigError::InputIsDirectory(input.clone()));
            }
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Workspace path not found
    #[error("Workspace path not found: {0}")]
    WorkspaceNotFound(PathBuf),

    /// Workspace path is not a directory
    #[error("Workspace path is not a directory: {0}")]
    WorkspaceNotDirectory(PathBuf),

    /// Input report file not found
    #[error("Input report not found: {0}")]
    InputNotFound(PathBuf),

    /// Input report path is a directory
    #[error("Input report is a directory: {0}")]
    InputIsDirectory(PathBuf),
}
