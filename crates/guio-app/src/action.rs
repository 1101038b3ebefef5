//! Side effects produced by the application state machines.

use guio_proto::Command;

/// Instructions for the runtime to execute, in order.
///
/// The state machines never touch the transport or the scheduler directly;
/// they return these and the runtime carries them out. Ordering within one
/// returned batch is significant (an acknowledgment always precedes the
/// effect commands of the same event).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Write a framed GUI-O command to the transport.
    Send(Command),

    /// Start (or restart) the once-per-second time-update clock.
    StartClock,

    /// Stop the time-update clock. Idempotent: stopping an already-stopped
    /// clock is a no-op.
    StopClock,
}
