//! Fuzz target for line framing under arbitrary chunking
//!
//! # Strategy
//!
//! - Arbitrary byte stream (including invalid UTF-8 and stray `\r`/`\n`)
//! - Arbitrary split of that stream into feed chunks
//!
//! # Invariants
//!
//! - Chunking is transparent: any split of the stream emits the same lines
//!   as feeding it whole
//! - Emitted lines never contain the delimiter
//! - NEVER panic, whatever the bytes

#![no_main]

use arbitrary::Arbitrary;
use guio_proto::LineFramer;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct ChunkedStream {
    stream: Vec<u8>,
    cuts: Vec<usize>,
}

fuzz_target!(|input: ChunkedStream| {
    let mut whole = LineFramer::new();
    let reference = whole.feed(&input.stream);

    let mut chunked = LineFramer::new();
    let mut emitted = Vec::new();
    let mut rest = input.stream.as_slice();
    for cut in &input.cuts {
        if rest.is_empty() {
            break;
        }
        let take = cut % (rest.len() + 1);
        let (chunk, remainder) = rest.split_at(take);
        emitted.extend(chunked.feed(chunk));
        rest = remainder;
    }
    emitted.extend(chunked.feed(rest));

    assert_eq!(emitted, reference);
    for line in &emitted {
        assert!(!line.contains("\r\n"));
    }
});
