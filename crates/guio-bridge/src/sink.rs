//! Outbound command sink.

use std::io;

use bytes::BytesMut;
use guio_proto::Command;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Writes framed GUI-O commands to the transport.
///
/// Each command is encoded (`$` sentinel, text, `\n` delimiter) and written
/// in one call, then flushed. No buffering, batching, or acknowledgment
/// happens at this layer; delivery order to the transport matches call
/// order.
#[derive(Debug)]
pub struct CommandSink<W> {
    writer: W,
    scratch: BytesMut,
}

impl<W: AsyncWrite + Unpin> CommandSink<W> {
    /// Wrap the write half of the transport.
    pub fn new(writer: W) -> Self {
        Self { writer, scratch: BytesMut::new() }
    }

    /// Frame and write one command.
    ///
    /// # Errors
    ///
    /// Propagates the underlying I/O error; a write failure is fatal to the
    /// process, not retried.
    pub async fn send(&mut self, command: &Command) -> io::Result<()> {
        tracing::debug!("sending command: {}", command.text());

        self.scratch.clear();
        command.encode(&mut self.scratch);
        self.writer.write_all(&self.scratch).await?;
        self.writer.flush().await
    }
}
