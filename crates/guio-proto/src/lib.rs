//! Wire protocol for the GUI-O serial link.
//!
//! GUI-O is a compact textual UI-description protocol spoken over a serial
//! connection to a microcontroller-driven touch display. This crate covers
//! the transport-adjacent pieces with no I/O of their own:
//!
//! - [`LineFramer`]: accumulates raw byte chunks and emits complete
//!   `\r\n`-delimited lines.
//! - [`InboundLine`]: classifies a decoded line by its leading sentinel
//!   character (`$`, `!`, or none).
//! - [`Command`]: an outbound GUI-O command and its wire encoding
//!   (`$` sentinel + text + `\n`).
//!
//! Higher-level semantics (sessions, routing, counters) live in `guio-app`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod command;
mod framer;
mod line;

pub use command::Command;
pub use framer::LineFramer;
pub use line::InboundLine;
