//! Sentinel classification of inbound protocol lines.
//!
//! Every decoded line falls into exactly one of three categories selected by
//! its first character. Classification is a single explicit step here so the
//! routing layer can match on a tagged variant instead of scattering string
//! prefix checks through handling code.

/// An inbound protocol line, classified by its leading sentinel character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundLine {
    /// `$`-prefixed GUI-O message (prefix stripped). Drives the application
    /// session lifecycle and event handling.
    Gui(String),

    /// `!`-prefixed device-status message (prefix stripped). Surfaced for
    /// observability only; never mutates state.
    Status(String),

    /// Anything else: an unstructured diagnostic line from the device.
    Diagnostic(String),
}

impl InboundLine {
    /// Classify a decoded line by its sentinel prefix.
    #[must_use]
    pub fn classify(line: &str) -> Self {
        if let Some(rest) = line.strip_prefix('$') {
            Self::Gui(rest.to_string())
        } else if let Some(rest) = line.strip_prefix('!') {
            Self::Status(rest.to_string())
        } else {
            Self::Diagnostic(line.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gui_sentinel_is_stripped() {
        assert_eq!(
            InboundLine::classify("$@init DPW:128 DPH:64"),
            InboundLine::Gui("@init DPW:128 DPH:64".to_string())
        );
    }

    #[test]
    fn status_sentinel_is_stripped() {
        assert_eq!(InboundLine::classify("!READY"), InboundLine::Status("READY".to_string()));
    }

    #[test]
    fn anything_else_is_diagnostic() {
        assert_eq!(
            InboundLine::classify("boot: 115200"),
            InboundLine::Diagnostic("boot: 115200".to_string())
        );
    }

    #[test]
    fn sentinel_only_in_first_position() {
        assert_eq!(InboundLine::classify("x$y"), InboundLine::Diagnostic("x$y".to_string()));
    }
}
