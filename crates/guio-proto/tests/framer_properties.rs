//! Property-based tests for the line framer.
//!
//! The central framing property: however the byte stream is split into
//! chunks, the emitted lines are exactly the lines of the stream up to its
//! last complete delimiter.

use guio_proto::LineFramer;
use proptest::prelude::*;

/// Feed `stream` to a fresh framer in the chunk sizes described by `cuts`,
/// collecting every emitted line.
fn feed_in_chunks(stream: &[u8], cuts: &[usize]) -> Vec<String> {
    let mut framer = LineFramer::new();
    let mut emitted = Vec::new();
    let mut rest = stream;

    for cut in cuts {
        if rest.is_empty() {
            break;
        }
        let take = cut % (rest.len() + 1);
        let (chunk, remainder) = rest.split_at(take);
        emitted.extend(framer.feed(chunk));
        rest = remainder;
    }
    emitted.extend(framer.feed(rest));
    emitted
}

proptest! {
    #[test]
    fn chunking_is_transparent(
        lines in prop::collection::vec("[a-zA-Z0-9@$!?|:. ]{0,24}", 0..8),
        cuts in prop::collection::vec(any::<usize>(), 0..16),
    ) {
        let mut stream = Vec::new();
        for line in &lines {
            stream.extend_from_slice(line.as_bytes());
            stream.extend_from_slice(b"\r\n");
        }

        let emitted = feed_in_chunks(&stream, &cuts);
        prop_assert_eq!(emitted, lines);
    }

    #[test]
    fn trailing_bytes_without_delimiter_are_held(
        line in "[a-zA-Z0-9@ ]{0,24}",
        tail in "[a-zA-Z0-9@ ]{1,24}",
    ) {
        let mut framer = LineFramer::new();
        let mut stream = line.as_bytes().to_vec();
        stream.extend_from_slice(b"\r\n");
        stream.extend_from_slice(tail.as_bytes());

        let emitted = framer.feed(&stream);
        prop_assert_eq!(emitted, vec![line]);
        prop_assert_eq!(framer.pending(), tail.len());
    }
}
