//! GUI-O serial bridge runtime.
//!
//! Production "glue" that wraps the sans-IO application layer with real
//! I/O: bytes come in from the serial link, get framed into lines, routed
//! through [`guio_app::Router`], and the resulting actions are executed
//! here — commands written back through the [`CommandSink`], the periodic
//! time-update clock started and stopped.
//!
//! # Concurrency model
//!
//! One logical thread of control. The run loop is a single `select!` over
//! transport reads and the clock tick, so inbound handling and tick
//! handling never interleave. The clock exists only between a session's
//! `StartClock` and `StopClock` actions; stopping it drops the interval, so
//! no tick can be observed afterward, even one already due to fire.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
mod sink;

use std::time::Duration;

use chrono::Local;
pub use error::BridgeError;
use guio_app::{Action, Router};
use guio_proto::LineFramer;
pub use sink::CommandSink;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite},
    time::Interval,
};

/// Interval between time-label updates.
const CLOCK_PERIOD: Duration = Duration::from_secs(1);

/// Read buffer size for serial chunks.
const READ_BUFFER_SIZE: usize = 1024;

/// The bridge run loop over one duplex byte transport.
///
/// Generic over the transport so tests can drive it through an in-memory
/// duplex pipe; production uses a [`tokio_serial::SerialStream`].
#[derive(Debug)]
pub struct Bridge<T> {
    transport: T,
}

impl<T: AsyncRead + AsyncWrite + Unpin> Bridge<T> {
    /// Create a bridge over an open transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Run until the peer closes the transport or a fatal error occurs.
    ///
    /// Returns `Ok(())` on a clean peer close (read of zero bytes).
    ///
    /// # Errors
    ///
    /// - [`BridgeError::Transport`] on a read or write failure.
    /// - [`BridgeError::Session`] on a malformed `@init` line.
    pub async fn run(self) -> Result<(), BridgeError> {
        let (mut reader, writer) = tokio::io::split(self.transport);
        let mut sink = CommandSink::new(writer);
        let mut framer = LineFramer::new();
        let mut router = Router::new();
        let mut clock: Option<Interval> = None;
        let mut buffer = [0u8; READ_BUFFER_SIZE];

        loop {
            let actions = tokio::select! {
                read = reader.read(&mut buffer) => match read {
                    Ok(0) => {
                        tracing::info!("serial port closed by peer");
                        break;
                    },
                    Ok(count) => {
                        tracing::debug!("received {count} bytes");
                        let mut actions = Vec::new();
                        for line in framer.feed(&buffer[..count]) {
                            tracing::debug!("received line: {line}");
                            actions.extend(router.route(&line)?);
                        }
                        actions
                    },
                    Err(error) => {
                        return Err(BridgeError::Transport(format!("serial read failed: {error}")));
                    },
                },
                () = next_tick(&mut clock) => router.tick(Local::now().naive_local()),
            };

            for action in actions {
                match action {
                    Action::Send(command) => {
                        sink.send(&command).await.map_err(|error| {
                            BridgeError::Transport(format!("serial write failed: {error}"))
                        })?;
                    },
                    Action::StartClock => {
                        // Replaces any running clock; the first tick fires
                        // immediately, matching the display's expectation of
                        // a prompt first time update.
                        clock = Some(tokio::time::interval(CLOCK_PERIOD));
                    },
                    Action::StopClock => clock = None,
                }
            }
        }

        Ok(())
    }
}

/// Wait for the next clock tick, or forever if the clock is stopped.
async fn next_tick(clock: &mut Option<Interval>) {
    match clock {
        Some(interval) => {
            interval.tick().await;
        },
        None => std::future::pending::<()>().await,
    }
}
