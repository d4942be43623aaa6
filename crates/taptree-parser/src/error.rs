// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for taptree-parser

use thiserror::Error;

/// Errors that can occur while translating a TAP report
#[derive(Debug, Error)]
pub enum TapError {
    /// The source file named by a main-test line could not be read
    #[error("Failed to read source code from '{path}': {source}")]
    SourceRead {
        /// Source path as it appears in the report
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A subtest line appeared before any main-test line
    #[error("Subtest '{name}' on line {line} has no enclosing test file")]
    OrphanSubtest {
        /// 1-based line number in the report
        line: usize,
        /// Declared subtest name
        name: String,
    },

    /// Conventions produced a pattern that does not compile
    #[error("Invalid line pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl TapError {
    /// Create a source read error for `path`
    pub fn source_read(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::SourceRead {
            path: path.into(),
            source,
        }
    }
}
