// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! taptree-parser: TAP subtest reports to runnable test trees
//!
//! This library crate translates a streamed TAP report, where nesting is
//! expressed by the indentation of `# Subtest:` lines, into a tree of test
//! modules and subtests. Every node carries the runner invocation that
//! re-runs exactly that node and the source line that declares it.
//!
//! # Example
//!
//! ```no_run
//! use taptree_parser::{Conventions, FsSourceProvider, Translator};
//!
//! let mut translator = Translator::new(Conventions::default(), FsSourceProvider::current_dir());
//! translator.write_chunk(b"# Subtest: test/foo.test.js\n");
//! translator.write_chunk(b"    # Subtest: adds numbers\n");
//! let roots = translator.finish().unwrap();
//! ```

pub mod builder;
pub mod classify;
pub mod conventions;
pub mod error;
pub mod index;
pub mod node;
pub mod translator;

pub use builder::TreeBuilder;
pub use classify::{Classifier, LineKind};
pub use conventions::Conventions;
pub use error::TapError;
pub use index::{FsSourceProvider, LineIndex, MemorySourceProvider, SourceProvider};
pub use node::TestNode;
pub use translator::{Translator, translate_str};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::conventions::Conventions;
    pub use crate::error::TapError;
    pub use crate::index::{FsSourceProvider, SourceProvider};
    pub use crate::node::TestNode;
    pub use crate::translator::{Translator, translate_str};
}
