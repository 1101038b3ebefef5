//! Inbound line routing and session lifecycle.
//!
//! The router classifies each framed line by its sentinel prefix and
//! dispatches it: GUI-O messages drive the session lifecycle and event
//! handling, device-status messages are surfaced in the logs, and anything
//! else is an unstructured diagnostic. It also owns the process-wide
//! cumulative toggle counter so that a new session inherits the last
//! session's value.

use chrono::NaiveDateTime;
use guio_proto::InboundLine;

use crate::{Action, Session, SessionError, session::INIT_PREFIX};

/// Routes protocol lines to the active session and owns session lifecycle.
///
/// At most one session exists at a time. An `@init` line replaces any prior
/// session without explicit teardown; events addressed to a terminated or
/// absent session are logged and dropped, never buffered or retried.
#[derive(Debug, Default)]
pub struct Router {
    session: Option<Session>,
    /// Cumulative toggle count for the life of the process. Monotonically
    /// non-decreasing; carried across sessions.
    total: u64,
}

impl Router {
    /// Create a router with no session and a zero cumulative count.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one framed line, returning the actions it produced.
    ///
    /// Empty lines, status lines, diagnostics, and events without a live
    /// session all yield no actions. Malformed event payloads are contained
    /// inside the session: acked, logged, counters untouched.
    ///
    /// # Errors
    ///
    /// [`SessionError::MalformedInit`] if an `@init` line is unparseable.
    /// There is no well-defined UI state to fall back to, so the caller
    /// treats this as fatal.
    pub fn route(&mut self, line: &str) -> Result<Vec<Action>, SessionError> {
        if line.is_empty() {
            tracing::warn!("received empty line");
            return Ok(Vec::new());
        }

        match InboundLine::classify(line) {
            InboundLine::Gui(message) => self.route_gui(&message),
            InboundLine::Status(message) => {
                tracing::info!("device status: {message}");
                Ok(Vec::new())
            },
            InboundLine::Diagnostic(message) => {
                tracing::debug!("diagnostic: {message}");
                Ok(Vec::new())
            },
        }
    }

    /// Handle a GUI-O message: session initialization or an event for the
    /// active session.
    fn route_gui(&mut self, message: &str) -> Result<Vec<Action>, SessionError> {
        if message.starts_with(INIT_PREFIX) {
            // Any prior session is discarded; the cumulative count survives.
            let (session, actions) = Session::start(message, self.total)?;
            self.session = Some(session);
            return Ok(actions);
        }

        match &mut self.session {
            Some(session) if session.is_active() => {
                Ok(session.handle(message, &mut self.total))
            },
            Some(_) => {
                tracing::warn!("GUI-O message for terminated session: {message}");
                Ok(Vec::new())
            },
            None => {
                tracing::warn!("GUI-O message with no session: {message}");
                Ok(Vec::new())
            },
        }
    }

    /// Forward a clock tick to the active session.
    pub fn tick(&self, now: NaiveDateTime) -> Vec<Action> {
        self.session.as_ref().map(|session| session.tick(now)).unwrap_or_default()
    }

    /// Cumulative toggle count for the life of the process.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The current session, live or terminated. `None` before the first
    /// `@init`.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}
