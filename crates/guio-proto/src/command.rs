//! Outbound GUI-O command and its wire encoding.

use bytes::BufMut;

/// An outbound GUI-O command.
///
/// Holds the command text without framing. On the wire a command is the `$`
/// sentinel, the ASCII/UTF-8 text, and a `\n` terminator, in that exact
/// order; [`Command::encode`] produces that framing deterministically.
///
/// Text is of the form `|TAG KEY:VALUE ...` for widget construction or
/// `@ID KEY:VALUE ...` for updates and control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    text: String,
}

impl Command {
    /// Create a command from its unframed text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Unframed command text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Encode the framed command into a buffer.
    ///
    /// Writes `$`, the command text, and the `\n` delimiter. No size limit
    /// applies; GUI-O commands are short by construction.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_u8(b'$');
        dst.put_slice(self.text.as_bytes());
        dst.put_u8(b'\n');
    }
}
