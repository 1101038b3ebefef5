//! Line framing for the raw serial byte stream.
//!
//! The serial link delivers chunks of arbitrary size with no relation to
//! protocol line boundaries. [`LineFramer`] reassembles the stream into
//! discrete lines so that chunking is transparent to the layers above.

use bytes::{Buf, BytesMut};

/// Two-byte line delimiter used on the wire.
const DELIMITER: &[u8] = b"\r\n";

/// Reassembles `\r\n`-delimited lines from arbitrary byte chunks.
///
/// Bytes received since the last delimiter are held in an internal
/// accumulator, so delimiters may span chunk boundaries. The accumulator
/// never contains a delimiter itself; it is consumed on each emission.
///
/// # Invariants
///
/// - Concatenating all emitted lines with delimiters reinserted reproduces
///   the input stream up to the last complete delimiter.
/// - Empty lines (two consecutive delimiters) are emitted; dropping them is
///   the router's responsibility, not the framer's.
///
/// A framer is tied to one byte stream: state does not carry across framer
/// instances.
#[derive(Debug, Default)]
pub struct LineFramer {
    buffer: BytesMut,
}

impl LineFramer {
    /// Create a framer with an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self { buffer: BytesMut::new() }
    }

    /// Feed one chunk of raw bytes, returning every line completed by it.
    ///
    /// Returns one `String` per delimiter found, in stream order, with the
    /// delimiter stripped. Bytes after the last delimiter wait in the
    /// accumulator for further input; a partial line waits indefinitely.
    ///
    /// Invalid UTF-8 sequences are decoded lossily (replacement character)
    /// rather than failing: the link is expected to carry ASCII, but a noisy
    /// serial line must not wedge the framer.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(at) = find_delimiter(&self.buffer) {
            let line = self.buffer.split_to(at);
            self.buffer.advance(DELIMITER.len());
            lines.push(String::from_utf8_lossy(&line).into_owned());
        }
        lines
    }

    /// Number of bytes waiting for a delimiter.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn find_delimiter(buffer: &[u8]) -> Option<usize> {
    buffer.windows(DELIMITER.len()).position(|window| window == DELIMITER)
}
