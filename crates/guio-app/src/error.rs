//! Error types for the application layer.
//!
//! Session construction is the one fatal path: a malformed `@init` leaves
//! no usable UI state to fall back to. Malformed event payloads never
//! surface as errors; the session acks the device (which is blocking on
//! that reply), logs the problem, and drops the event.

use thiserror::Error;

/// Errors raised by session construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The `@init` handshake line is missing or carries unparseable screen
    /// dimensions. Fatal to the construction attempt: no partial session is
    /// created.
    #[error("malformed init line: {reason}")]
    MalformedInit {
        /// What was wrong with the line.
        reason: String,
    },
}
