// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Buffer-until-close stream translation
//!
//! The report is accepted as raw byte chunks in arrival order and nothing is
//! parsed until [`Translator::finish`] is called. Chunk boundaries may fall
//! anywhere, including inside a multi-byte character.

use std::io;
use tracing::{trace, warn};

use crate::builder::TreeBuilder;
use crate::conventions::Conventions;
use crate::error::TapError;
use crate::index::SourceProvider;
use crate::node::TestNode;

/// Sink collecting a TAP report and translating it on close
pub struct Translator<P> {
    conventions: Conventions,
    provider: P,
    buffer: Vec<u8>,
}

impl<P: SourceProvider> Translator<P> {
    /// Create a translator reading sources through `provider`
    #[must_use]
    pub fn new(conventions: Conventions, provider: P) -> Self {
        Self {
            conventions,
            provider,
            buffer: Vec::new(),
        }
    }

    /// Append a chunk of the report
    pub fn write_chunk(&mut self, chunk: &[u8]) {
        trace!(bytes = chunk.len(), "Buffered report chunk");
        self.buffer.extend_from_slice(chunk);
    }

    /// Bytes buffered so far
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Close the stream and translate everything buffered
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while building the trees; no partial
    /// results are returned in that case.
    pub fn finish(self) -> Result<Vec<TestNode>, TapError> {
        let text = match String::from_utf8(self.buffer) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    valid_up_to = e.utf8_error().valid_up_to(),
                    "Report is not valid UTF-8, decoding lossily"
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        translate_str(&text, self.conventions, self.provider)
    }
}

impl<P: SourceProvider> io::Write for Translator<P> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_chunk(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Translate a complete report held in memory
///
/// # Errors
///
/// Returns `TapError` if the conventions are invalid, a source cannot be
/// read, or a subtest has no enclosing module.
pub fn translate_str<P: SourceProvider>(
    text: &str,
    conventions: Conventions,
    provider: P,
) -> Result<Vec<TestNode>, TapError> {
    let mut builder = TreeBuilder::new(conventions, provider)?;
    for line in text.split('\n') {
        builder.feed_line(line)?;
    }
    Ok(builder.finish())
}
