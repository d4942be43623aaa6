// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! TAP line classification
//!
//! Two line shapes matter, tested in this order:
//!
//! - a main-test line, `# Subtest: test/<path>.test.js`, which opens a new
//!   test module
//! - a subtest line, `<spaces># Subtest: <name>`, whose indentation width
//!   places it in the tree
//!
//! Every other line is [`LineKind::Unrecognized`] and has no effect.

use regex::Regex;
use std::sync::LazyLock;

use crate::conventions::Conventions;
use crate::error::TapError;

static SUBTEST_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^( +)# Subtest: (.*)$").expect("static regex must compile"));

/// A classified report line, borrowing from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Top-level announcement of a test module by its bare path
    MainTest {
        /// Path without test directory and extension
        path: &'a str,
    },
    /// Indented announcement of a nested subtest
    Subtest {
        /// Leading whitespace; its length is the nesting depth
        indent: &'a str,
        /// Declared subtest name
        name: &'a str,
    },
    /// Anything else
    Unrecognized,
}

impl LineKind<'_> {
    /// Indentation width of a subtest line, `0` otherwise
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Subtest { indent, .. } => indent.len(),
            _ => 0,
        }
    }
}

/// Ordered set of line matchers built from [`Conventions`]
#[derive(Debug, Clone)]
pub struct Classifier {
    main_test: Regex,
}

impl Classifier {
    /// Build the matchers for the given conventions
    ///
    /// # Errors
    ///
    /// Returns `TapError::InvalidPattern` if the main-test pattern fails to
    /// compile.
    pub fn new(conventions: &Conventions) -> Result<Self, TapError> {
        let pattern = format!(
            r"^# Subtest: {}/(.*){}$",
            regex::escape(&conventions.test_dir),
            regex::escape(&conventions.extension)
        );
        Ok(Self {
            main_test: Regex::new(&pattern)?,
        })
    }

    /// Classify one line
    #[must_use]
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        if let Some(caps) = self.main_test.captures(line) {
            if let Some(path) = caps.get(1) {
                return LineKind::MainTest {
                    path: path.as_str(),
                };
            }
        }

        if let Some(caps) = SUBTEST_LINE.captures(line) {
            if let (Some(indent), Some(name)) = (caps.get(1), caps.get(2)) {
                return LineKind::Subtest {
                    indent: indent.as_str(),
                    name: name.as_str(),
                };
            }
        }

        LineKind::Unrecognized
    }
}
