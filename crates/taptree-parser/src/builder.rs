// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Stack-based tree building
//!
//! Lines are folded into a nesting stack keyed by indentation width. The
//! bottom frame is the open test module; each subtest line pops frames at
//! the same or deeper indentation and pushes itself on top.
//!
//! Frames own their nodes. A node is attached to its parent's children when
//! its frame is popped, which always happens before the next sibling is
//! discovered, so children keep discovery order.
//!
//! ```
//! use taptree_parser::builder::TreeBuilder;
//! use taptree_parser::conventions::Conventions;
//! use taptree_parser::index::MemorySourceProvider;
//!
//! let sources = MemorySourceProvider::new()
//!     .with_source("test/math.test.js", "\nt.test('adds', t => {})\n");
//! let mut builder = TreeBuilder::new(Conventions::default(), sources).unwrap();
//! builder.feed_line("# Subtest: test/math.test.js").unwrap();
//! builder.feed_line("    # Subtest: adds").unwrap();
//! let roots = builder.finish();
//! assert_eq!(roots[0].children[0].line, 2);
//! ```

use std::iter;
use tracing::{debug, info};

use crate::classify::{Classifier, LineKind};
use crate::conventions::Conventions;
use crate::error::TapError;
use crate::index::{LineIndex, SourceProvider};
use crate::node::TestNode;

/// Line number given to roots and to subtests with no known declaration
pub const UNKNOWN_LINE: usize = 1;

/// A node under construction and the indentation it was announced at
#[derive(Debug)]
struct Frame {
    node: TestNode,
    depth: usize,
    /// Bare subtest name; `None` for the module root
    name: Option<String>,
}

/// Incremental builder of runnable test trees
pub struct TreeBuilder<P> {
    classifier: Classifier,
    conventions: Conventions,
    provider: P,
    stack: Vec<Frame>,
    index: LineIndex,
    results: Vec<TestNode>,
    line_number: usize,
}

impl<P: SourceProvider> TreeBuilder<P> {
    /// Create a builder reading sources through `provider`
    ///
    /// # Errors
    ///
    /// Returns `TapError::InvalidPattern` if the conventions do not yield a
    /// valid main-test pattern.
    pub fn new(conventions: Conventions, provider: P) -> Result<Self, TapError> {
        Ok(Self {
            classifier: Classifier::new(&conventions)?,
            conventions,
            provider,
            stack: Vec::new(),
            index: LineIndex::default(),
            results: Vec::new(),
            line_number: 0,
        })
    }

    /// Process a single report line
    ///
    /// A trailing `\r` is ignored. Unrecognized lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns `TapError::SourceRead` if a main-test line names an unreadable
    /// source, or `TapError::OrphanSubtest` if a subtest line arrives before
    /// any main-test line. The builder should be discarded after an error.
    pub fn feed_line(&mut self, line: &str) -> Result<(), TapError> {
        self.line_number += 1;
        let line = line.strip_suffix('\r').unwrap_or(line);

        let kind = self.classifier.classify(line);
        match kind {
            LineKind::MainTest { path } => self.open_root(path),
            LineKind::Subtest { name, .. } => self.push_subtest(kind.depth(), name),
            LineKind::Unrecognized => Ok(()),
        }
    }

    /// Whether a test module is currently open
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Test modules completed so far, excluding the open one
    #[must_use]
    pub fn results(&self) -> &[TestNode] {
        &self.results
    }

    /// Close the open module, if any, and return every completed tree
    #[must_use]
    pub fn finish(mut self) -> Vec<TestNode> {
        self.close_root();
        info!(
            roots = self.results.len(),
            subtests = self.results.iter().map(TestNode::subtest_count).sum::<usize>(),
            "Translated test report"
        );
        self.results
    }

    fn open_root(&mut self, path: &str) -> Result<(), TapError> {
        self.close_root();

        let file = self.conventions.source_path(path);
        self.index = LineIndex::load(&self.provider, &file)?;

        let root = TestNode {
            label: path.to_string(),
            command: self.conventions.command.clone(),
            args: self.conventions.runner_args::<&str>(&file, &[]),
            file,
            line: UNKNOWN_LINE,
            children: Vec::new(),
        };
        debug!(file = %root.file, line = self.line_number, "Opened test module");

        self.stack.push(Frame {
            node: root,
            depth: 0,
            name: None,
        });
        Ok(())
    }

    fn push_subtest(&mut self, depth: usize, name: &str) -> Result<(), TapError> {
        let Some(root) = self.stack.first() else {
            return Err(TapError::OrphanSubtest {
                line: self.line_number,
                name: name.to_string(),
            });
        };
        let file = root.node.file.clone();

        while self.stack.len() > 1 && self.stack.last().is_some_and(|f| f.depth >= depth) {
            self.pop_frame();
        }

        let names: Vec<&str> = self
            .stack
            .iter()
            .filter_map(|frame| frame.name.as_deref())
            .chain(iter::once(name))
            .collect();

        let node = TestNode {
            label: names.join(" "),
            command: self.conventions.command.clone(),
            args: self.conventions.runner_args(&file, &names),
            file,
            line: self.index.line_of(name).unwrap_or(UNKNOWN_LINE),
            children: Vec::new(),
        };
        debug!(label = %node.label, depth, line = node.line, "Found subtest");

        self.stack.push(Frame {
            node,
            depth,
            name: Some(name.to_string()),
        });
        Ok(())
    }

    fn pop_frame(&mut self) {
        if let Some(frame) = self.stack.pop() {
            if let Some(parent) = self.stack.last_mut() {
                parent.node.children.push(frame.node);
            } else {
                self.results.push(frame.node);
            }
        }
    }

    fn close_root(&mut self) {
        while !self.stack.is_empty() {
            self.pop_frame();
        }
        self.index = LineIndex::default();
    }
}
