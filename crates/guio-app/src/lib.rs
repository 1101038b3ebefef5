//! Application layer for the GUI-O toggle counter bridge.
//!
//! Pure state machines with no I/O dependencies: they consume decoded
//! protocol lines and clock ticks, and produce [`Action`] instructions for
//! the runtime to execute. This keeps every lifecycle and counting rule
//! testable without a serial port.
//!
//! # Components
//!
//! - [`Router`]: classifies inbound lines and owns the session lifecycle
//!   plus the process-wide cumulative toggle counter.
//! - [`Session`]: one live instance of the rendered counter UI, created by
//!   an `@init` handshake and terminated by the exit button.
//! - [`Action`]: side effects the runtime executes (send a command,
//!   start/stop the periodic clock).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod error;
mod router;
mod session;

pub use action::Action;
pub use error::SessionError;
pub use router::Router;
pub use session::Session;
