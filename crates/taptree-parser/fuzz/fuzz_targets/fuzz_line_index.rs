// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for source indexing

#![no_main]

use libfuzzer_sys::fuzz_target;

use taptree_parser::LineIndex;

fuzz_target!(|data: &[u8]| {
    if let Ok(source) = std::str::from_utf8(data) {
        let index = LineIndex::from_source(source);
        assert!(index.len() <= source.split('\n').count());
    }
});
