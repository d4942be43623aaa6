// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the stream translator
//!
//! Arbitrary bytes are fed as a report against a fixed set of in-memory
//! sources. Translation may fail but should never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

use taptree_parser::{Conventions, MemorySourceProvider, Translator};

fuzz_target!(|data: &[u8]| {
    let sources = MemorySourceProvider::new()
        .with_source("test/a.test.js", "test('x', t => {})\n")
        .with_source("test/b.test.js", "");

    let mut translator = Translator::new(Conventions::default(), sources);
    for chunk in data.chunks(64) {
        translator.write_chunk(chunk);
    }

    let _ = translator.finish();
});
