// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Runner and layout conventions
//!
//! A main-test line names a test module by its bare path (`foo` for
//! `test/foo.test.js`). These conventions decide where that module lives on
//! disk and how the test runner is invoked to re-run it.

use serde::{Deserialize, Serialize};

/// Default directory holding test modules
pub const DEFAULT_TEST_DIR: &str = "test";
/// Default suffix of a test module
pub const DEFAULT_EXTENSION: &str = ".test.js";
/// Default executable placed in every node's `command`
pub const DEFAULT_COMMAND: &str = "node";
/// Default runner entry point, always `args[0]`
pub const DEFAULT_RUNNER: &str = "node_modules/tap/bin/run.js";

/// Flag passed to the runner before each subtest name filter
pub const FILTER_FLAG: &str = "-g";

/// How test modules are located and re-run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
    /// Directory prefix of main-test paths, without trailing slash
    pub test_dir: String,
    /// Suffix appended to a bare main-test path
    pub extension: String,
    /// Runner executable
    pub command: String,
    /// Runner entry point
    pub runner: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            test_dir: DEFAULT_TEST_DIR.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            command: DEFAULT_COMMAND.to_string(),
            runner: DEFAULT_RUNNER.to_string(),
        }
    }
}

impl Conventions {
    /// Set the test directory
    #[must_use]
    pub fn with_test_dir(mut self, test_dir: &str) -> Self {
        self.test_dir = test_dir.trim_end_matches('/').to_string();
        self
    }

    /// Set the test module extension
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.to_string();
        self
    }

    /// Set the runner executable
    #[must_use]
    pub fn with_command(mut self, command: &str) -> Self {
        self.command = command.to_string();
        self
    }

    /// Set the runner entry point
    #[must_use]
    pub fn with_runner(mut self, runner: &str) -> Self {
        self.runner = runner.to_string();
        self
    }

    /// Source file path for a bare main-test path
    ///
    /// `foo/bar` becomes `test/foo/bar.test.js` under the defaults.
    #[must_use]
    pub fn source_path(&self, bare: &str) -> String {
        format!("{}/{}{}", self.test_dir, bare, self.extension)
    }

    /// Runner arguments for `file`, narrowed by a chain of subtest names
    #[must_use]
    pub fn runner_args<S: AsRef<str>>(&self, file: &str, filters: &[S]) -> Vec<String> {
        let mut args = Vec::with_capacity(2 + filters.len() * 2);
        args.push(self.runner.clone());
        args.push(file.to_string());
        for name in filters {
            args.push(FILTER_FLAG.to_string());
            args.push(name.as_ref().to_string());
        }
        args
    }
}
