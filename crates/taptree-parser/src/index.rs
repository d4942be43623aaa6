// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Source indexing
//!
//! Subtest names in a TAP report carry no location. The declaring source
//! file is scanned for `test('<name>', ...)` calls so each subtest can be
//! mapped back to its 1-based declaration line.

use regex::Regex;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::debug;

use crate::error::TapError;

static DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"test\(['"]([^'"]+)['"], "#).expect("static regex must compile")
});

/// Reads test module sources by their report-relative path
pub trait SourceProvider {
    /// Return the full text of the source at `path`
    ///
    /// # Errors
    ///
    /// Returns `TapError::SourceRead` if the source cannot be read.
    fn read_source(&self, path: &str) -> Result<String, TapError>;
}

impl<P: SourceProvider + ?Sized> SourceProvider for &P {
    fn read_source(&self, path: &str) -> Result<String, TapError> {
        (**self).read_source(path)
    }
}

/// Reads sources from disk relative to a root directory
#[derive(Debug, Clone, Default)]
pub struct FsSourceProvider {
    root: PathBuf,
}

impl FsSourceProvider {
    /// Resolve sources relative to `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve sources relative to the current directory
    #[must_use]
    pub fn current_dir() -> Self {
        Self::default()
    }
}

impl SourceProvider for FsSourceProvider {
    fn read_source(&self, path: &str) -> Result<String, TapError> {
        let full = self.root.join(path);
        let bytes = std::fs::read(&full).map_err(|e| TapError::source_read(path, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// In-memory sources keyed by path
#[derive(Debug, Clone, Default)]
pub struct MemorySourceProvider {
    sources: HashMap<String, String>,
}

impl MemorySourceProvider {
    /// Create an empty provider
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source, replacing any previous text for `path`
    #[must_use]
    pub fn with_source(mut self, path: &str, text: &str) -> Self {
        self.insert(path, text);
        self
    }

    /// Add a source in place
    pub fn insert(&mut self, path: &str, text: &str) {
        self.sources.insert(path.to_string(), text.to_string());
    }
}

impl SourceProvider for MemorySourceProvider {
    fn read_source(&self, path: &str) -> Result<String, TapError> {
        self.sources.get(path).cloned().ok_or_else(|| {
            TapError::source_read(path, io::Error::new(io::ErrorKind::NotFound, "no such source"))
        })
    }
}

/// Declared subtest name to 1-based line number
///
/// When a name is declared more than once the last declaration wins, so
/// same-named subtests all resolve to the final one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    lines: HashMap<String, usize>,
}

impl LineIndex {
    /// Scan source text for test declarations
    #[must_use]
    pub fn from_source(text: &str) -> Self {
        let mut lines = HashMap::new();
        for (number, code) in text.split('\n').enumerate() {
            if let Some(name) = DECLARATION.captures(code).and_then(|caps| caps.get(1)) {
                lines.insert(name.as_str().to_string(), number + 1);
            }
        }
        Self { lines }
    }

    /// Read `path` through `provider` and index it
    ///
    /// # Errors
    ///
    /// Returns `TapError::SourceRead` if the provider cannot read the file.
    pub fn load<P: SourceProvider + ?Sized>(provider: &P, path: &str) -> Result<Self, TapError> {
        let text = provider.read_source(path)?;
        let index = Self::from_source(&text);
        debug!(file = %path, declarations = index.len(), "Indexed test source");
        Ok(index)
    }

    /// Declaration line of `name`, if declared
    #[must_use]
    pub fn line_of(&self, name: &str) -> Option<usize> {
        self.lines.get(name).copied()
    }

    /// Number of distinct declared names
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether no declarations were found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
