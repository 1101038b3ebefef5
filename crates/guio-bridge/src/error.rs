//! Bridge error types.

use std::fmt;

use guio_app::SessionError;

/// Errors that can occur in the bridge process.
#[derive(Debug)]
pub enum BridgeError {
    /// Configuration error (unopenable serial port, bad parameters).
    ///
    /// Fatal before the bridge starts. Fix configuration and restart.
    Config(String),

    /// Transport error (serial read or write failure).
    ///
    /// Fatal to the process: the link is a single shared resource and
    /// writes are not retried.
    Transport(String),

    /// Session error propagated out of the application layer.
    ///
    /// Only malformed initialization reaches this level; malformed event
    /// payloads are contained inside the session.
    Session(SessionError),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Session(err) => write!(f, "session error: {err}"),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SessionError> for BridgeError {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
