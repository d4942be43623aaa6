//! Runnable test tree types

use serde::{Deserialize, Serialize};

use crate::conventions::FILTER_FLAG;

/// One runnable unit: a whole test module or a nested subtest
///
/// Serialized field order is part of the output format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestNode {
    /// Display name: the bare module path for a root, the space-joined
    /// subtest name chain for a nested node
    pub label: String,
    /// Runner executable
    pub command: String,
    /// Runner entry point, source file, then `-g <name>` pairs
    pub args: Vec<String>,
    /// Source file path, shared by a root and all its descendants
    pub file: String,
    /// 1-based declaration line, `1` when unknown
    pub line: usize,
    /// Nested subtests in discovery order
    pub children: Vec<TestNode>,
}

impl TestNode {
    /// Whether this node re-runs a whole module (no name filters)
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.filters().is_empty()
    }

    /// Subtest names this node filters on, outermost first
    #[must_use]
    pub fn filters(&self) -> Vec<&str> {
        let mut filters = Vec::new();
        let mut rest = self.args.iter().skip(2);
        while let Some(arg) = rest.next() {
            if arg == FILTER_FLAG {
                if let Some(name) = rest.next() {
                    filters.push(name.as_str());
                }
            }
        }
        filters
    }

    /// Number of descendants below this node
    #[must_use]
    pub fn subtest_count(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.subtest_count())
            .sum()
    }

    /// Depth-first search for a node with the given label, self included
    #[must_use]
    pub fn find(&self, label: &str) -> Option<&TestNode> {
        if self.label == label {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(label))
    }
}
