// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report translation driver
//!
//! Pipes the report from stdin or a file into a [`Translator`], renders the
//! resulting trees as JSON and writes them out. Output is only written once
//! the whole report has been translated, so a failure never leaves partial
//! JSON behind.

use std::fs::File;
use std::io::{self, Read, Write};

use anyhow::Context;
use taptree_parser::{
    Conventions, FsSourceProvider, SourceProvider, TapError, TestNode, Translator,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;

/// Errors that can occur while translating a report
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Reading the report failed
    #[error("Failed to read report: {0}")]
    Io(#[from] io::Error),

    /// The report could not be turned into test trees
    #[error(transparent)]
    Tap(#[from] TapError),

    /// Serializing the trees failed
    #[error("Failed to serialize test trees: {0}")]
    Json(#[from] serde_json::Error),
}

/// Outcome of one translation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranslateStats {
    /// Report bytes consumed
    pub bytes: u64,
    /// Test modules found
    pub roots: usize,
    /// Subtests found across all modules
    pub subtests: usize,
}

impl TranslateStats {
    fn from_roots(bytes: u64, roots: &[TestNode]) -> Self {
        Self {
            bytes,
            roots: roots.len(),
            subtests: roots.iter().map(TestNode::subtest_count).sum(),
        }
    }
}

/// Stream `reader` to the end through a translator
///
/// # Errors
///
/// Returns `TranslateError::Io` if reading fails, or `TranslateError::Tap`
/// if the report cannot be translated.
pub fn translate_reader<R, P>(
    mut reader: R,
    conventions: Conventions,
    provider: P,
) -> Result<(Vec<TestNode>, TranslateStats), TranslateError>
where
    R: Read,
    P: SourceProvider,
{
    let mut translator = Translator::new(conventions, provider);
    let bytes = io::copy(&mut reader, &mut translator)?;
    debug!(bytes, "Report stream closed");

    let roots = translator.finish()?;
    let stats = TranslateStats::from_roots(bytes, &roots);
    Ok((roots, stats))
}

/// Render trees as a JSON array followed by a newline
///
/// # Errors
///
/// Returns `TranslateError::Json` if serialization fails.
pub fn render(roots: &[TestNode], compact: bool) -> Result<String, TranslateError> {
    let mut json = if compact {
        serde_json::to_string(roots)?
    } else {
        serde_json::to_string_pretty(roots)?
    };
    json.push('\n');
    Ok(json)
}

/// Run a full translation as described by `config`
///
/// # Errors
///
/// Returns an error if the input cannot be opened or read, the report
/// cannot be translated, or the output cannot be written.
pub fn run(config: &Config) -> anyhow::Result<TranslateStats> {
    let workspace = config.workspace_path();
    let provider = FsSourceProvider::new(&workspace);
    let conventions = config.conventions();
    info!(workspace = %workspace.display(), "Translating TAP report");

    let (roots, stats) = match config.input {
        Some(ref path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open report {}", path.display()))?;
            translate_reader(file, conventions, provider)?
        }
        None => translate_reader(io::stdin().lock(), conventions, provider)?,
    };

    let json = render(&roots, config.compact)?;
    match config.output {
        Some(ref path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(json.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(stats)
}
