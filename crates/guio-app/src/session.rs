//! Session state machine for one live counter UI.
//!
//! A session is created by the display's `@init` handshake, which carries
//! the target screen size. Construction emits the ordered UI build-up
//! sequence; event handling reacts to the toggle and exit controls; the
//! periodic tick keeps the time label current. A session has exactly two
//! states, Active and Terminated, and Terminated is terminal.

use chrono::NaiveDateTime;
use guio_proto::Command;

use crate::{Action, SessionError};

/// Token that opens a session-initialization message (trailing space
/// separates it from the screen-size tokens).
pub(crate) const INIT_PREFIX: &str = "@init ";

/// Key prefixes carrying the screen dimensions on the init line.
const WIDTH_KEY: &str = "DPW:";
const HEIGHT_KEY: &str = "DPH:";

/// Control identifiers as they appear in inbound event tokens.
const TOGGLE_TOKEN: &str = "@tg1";
const EXIT_TOKEN: &str = "@btExit";

/// Label font size shared by every label in the demo UI.
const FONT_SIZE: u32 = 20;

/// Device-side acknowledgment timeout for interactive controls, in ms.
const ACK_TIMEOUT_MS: u32 = 1000;

/// Display hint passed when dismissing the loading indicator, in ms.
const LOADING_HIDE_MS: u32 = 500;

/// The two control events a session reacts to. Everything else is an
/// explicit no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlEvent {
    Toggle,
    Exit,
    Other,
}

/// Split an event's first token into its acknowledgment-request marker and
/// control variant. A leading `?` means the device expects `@ID CRE:1` back
/// before it proceeds.
fn classify_control(token: &str) -> (bool, ControlEvent) {
    let (ack, token) = match token.strip_prefix('?') {
        Some(stripped) => (true, stripped),
        None => (false, token),
    };
    let event = match token {
        TOGGLE_TOKEN => ControlEvent::Toggle,
        EXIT_TOKEN => ControlEvent::Exit,
        _ => ControlEvent::Other,
    };
    (ack, event)
}

/// One live instance of the rendered counter application.
///
/// The session owns its per-session toggle count; the process-wide
/// cumulative count is owned by whatever constructs sessions (the
/// [`Router`](crate::Router)) and passed in by reference, so a new session
/// inherits the last session's value without hidden ambient state.
#[derive(Debug)]
pub struct Session {
    active: bool,
    count: u64,
    screen_w: u32,
    screen_h: u32,
}

impl Session {
    /// Construct a session from an `@init` line and emit the UI build-up.
    ///
    /// `total` is the current cumulative toggle count, used to seed the
    /// total-count label. The returned actions are ordered: the loading
    /// indicator is shown first and dismissed last, and the controls and
    /// labels exist before the clock starts referencing them.
    ///
    /// # Errors
    ///
    /// [`SessionError::MalformedInit`] if the width or height token is
    /// missing or unparseable. No partial session is created.
    pub fn start(init_line: &str, total: u64) -> Result<(Self, Vec<Action>), SessionError> {
        let mut tokens = init_line.split(' ');
        if tokens.next() != Some("@init") {
            return Err(SessionError::MalformedInit { reason: "missing @init token".to_string() });
        }
        let screen_w = dimension(tokens.next(), WIDTH_KEY)?;
        let screen_h = dimension(tokens.next(), HEIGHT_KEY)?;

        tracing::info!("initializing session, target screen size {screen_w}x{screen_h}");

        let session = Self { active: true, count: 0, screen_w, screen_h };

        let mut actions = vec![
            // Loading animation up while the screen is rebuilt.
            send("@sls"),
            // Clear any prior layout and header chrome.
            send("@cls"),
            send("@clh"),
            // UI scaling and background color.
            send("@guis SCA:1 BGC:#FFFFFF"),
        ];

        actions.push(send(format!(
            r#"|LB UID:lbTime1 X:50 Y:5 FSZ:{FONT_SIZE} TXT:"Current time (backend):""#
        )));
        actions.push(send(format!(r#"|LB UID:lbTime2 X:50 Y:10 FSZ:{FONT_SIZE} TXT:"""#)));

        actions.push(send(format!("|TG UID:tg1 X:50 Y:30 RTO:{ACK_TIMEOUT_MS}")));

        actions.push(send(format!(
            r#"|LB UID:lbCount1 X:50 Y:40 FSZ:{FONT_SIZE} TXT:"Toggles (session): {}""#,
            session.count
        )));
        actions.push(send(format!(
            r#"|LB UID:lbCount2 X:50 Y:45 FSZ:{FONT_SIZE} TXT:"Toggles (total): {total}""#
        )));

        // Exit button sized 90% x 10% of the screen, with its label on top.
        // Widened so the scaling cannot overflow for any u32 width.
        let button_w = u64::from(screen_w) * 9 / 10;
        let button_h = screen_h / 10;
        actions.push(send(format!(
            "|BT UID:btExit X:50 Y:65 W:{button_w} H:{button_h} RTO:{ACK_TIMEOUT_MS}"
        )));
        actions.push(send(format!("|LB UID:lbExit X:50 Y:65 FSZ:{FONT_SIZE} TXT:Exit")));

        // The clock must be running before the loading indicator drops.
        actions.push(Action::StartClock);
        actions.push(send(format!("@hls {LOADING_HIDE_MS}")));

        Ok((session, actions))
    }

    /// Handle one GUI-O event line while Active.
    ///
    /// `total` is the process-wide cumulative toggle counter, incremented
    /// alongside the session counter. Callers must check [`Self::is_active`]
    /// first; the router treats a terminated session as gone.
    ///
    /// An acknowledgment-marked event is always answered first, before the
    /// event is parsed any further: the device blocks on that reply. Every
    /// toggle event counts once, regardless of the reported boolean state. A
    /// toggle with a missing or non-numeric state token is logged and
    /// dropped after the ack, leaving both counters untouched.
    pub fn handle(&mut self, line: &str, total: &mut u64) -> Vec<Action> {
        debug_assert!(self.active, "events must not reach a terminated session");

        let mut tokens = line.split(' ');
        let first = tokens.next().unwrap_or_default();
        let (ack, control) = classify_control(first);

        match control {
            ControlEvent::Toggle => {
                let mut actions = Vec::new();
                if ack {
                    actions.push(send(format!("{TOGGLE_TOKEN} CRE:1")));
                }

                let state_token = tokens.next().unwrap_or_default();
                let state: i64 = match state_token.parse() {
                    Ok(state) => state,
                    Err(_) => {
                        tracing::error!(
                            "dropping toggle event with non-numeric state '{state_token}'"
                        );
                        return actions;
                    },
                };
                tracing::info!("toggle state update: {state}");

                self.count += 1;
                *total += 1;

                actions.push(send(format!(
                    r#"@lbCount1 TXT:"Toggles (session): {}""#,
                    self.count
                )));
                actions.push(send(format!(r#"@lbCount2 TXT:"Toggles (total): {total}""#)));
                actions
            },
            ControlEvent::Exit => {
                tracing::info!("exit button pressed");

                let mut actions = Vec::new();
                if ack {
                    actions.push(send(format!("{EXIT_TOKEN} CRE:1")));
                }

                self.active = false;
                actions.push(Action::StopClock);
                actions.push(send("@cls"));
                actions.push(send("@clh"));
                actions
            },
            ControlEvent::Other => Vec::new(),
        }
    }

    /// Emit the once-per-second time-label update.
    ///
    /// Returns nothing once the session is Terminated: no tick is observable
    /// after the exit event regardless of runtime scheduling granularity.
    pub fn tick(&self, now: NaiveDateTime) -> Vec<Action> {
        if !self.active {
            return Vec::new();
        }
        tracing::debug!("updating time label: {now}");
        vec![send(format!(r#"@lbTime2 TXT:"{}""#, now.format("%Y-%m-%d %H:%M:%S")))]
    }

    /// Whether the session is still Active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Per-session toggle count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Target screen size from the `@init` handshake (width, height).
    #[must_use]
    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_w, self.screen_h)
    }
}

fn send(text: impl Into<String>) -> Action {
    Action::Send(Command::new(text))
}

/// Parse one `KEY:value` screen-dimension token from the init line.
fn dimension(token: Option<&str>, key: &str) -> Result<u32, SessionError> {
    let token = token
        .ok_or_else(|| SessionError::MalformedInit { reason: format!("missing {key} token") })?;
    let value = token.strip_prefix(key).ok_or_else(|| SessionError::MalformedInit {
        reason: format!("expected {key} token, got '{token}'"),
    })?;
    value.parse().map_err(|_| SessionError::MalformedInit {
        reason: format!("unparseable {key} value '{value}'"),
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sent(actions: &[Action]) -> Vec<&str> {
        actions
            .iter()
            .filter_map(|action| match action {
                Action::Send(command) => Some(command.text()),
                Action::StartClock | Action::StopClock => None,
            })
            .collect()
    }

    fn started() -> Session {
        let (session, _) = Session::start("@init DPW:128 DPH:64", 0).unwrap();
        session
    }

    #[test]
    fn start_emits_build_up_in_order() {
        let (session, actions) = Session::start("@init DPW:128 DPH:64", 7).unwrap();
        assert_eq!(session.screen_size(), (128, 64));

        assert_eq!(sent(&actions), vec![
            "@sls",
            "@cls",
            "@clh",
            "@guis SCA:1 BGC:#FFFFFF",
            r#"|LB UID:lbTime1 X:50 Y:5 FSZ:20 TXT:"Current time (backend):""#,
            r#"|LB UID:lbTime2 X:50 Y:10 FSZ:20 TXT:"""#,
            "|TG UID:tg1 X:50 Y:30 RTO:1000",
            r#"|LB UID:lbCount1 X:50 Y:40 FSZ:20 TXT:"Toggles (session): 0""#,
            r#"|LB UID:lbCount2 X:50 Y:45 FSZ:20 TXT:"Toggles (total): 7""#,
            "|BT UID:btExit X:50 Y:65 W:115 H:6 RTO:1000",
            "|LB UID:lbExit X:50 Y:65 FSZ:20 TXT:Exit",
            "@hls 500",
        ]);

        // The clock starts after the controls exist and before the loading
        // indicator drops.
        assert_eq!(actions[actions.len() - 2], Action::StartClock);
        assert!(matches!(actions.last(), Some(Action::Send(_))));
    }

    #[test]
    fn start_rejects_missing_height() {
        let err = Session::start("@init DPW:128", 0).unwrap_err();
        assert!(matches!(err, SessionError::MalformedInit { .. }));
    }

    #[test]
    fn start_rejects_non_numeric_width() {
        let err = Session::start("@init DPW:wide DPH:64", 0).unwrap_err();
        assert!(matches!(err, SessionError::MalformedInit { .. }));
    }

    #[test]
    fn start_rejects_swapped_keys() {
        let err = Session::start("@init DPH:64 DPW:128", 0).unwrap_err();
        assert!(matches!(err, SessionError::MalformedInit { .. }));
    }

    #[test]
    fn start_handles_maximum_screen_dimensions() {
        let (session, actions) = Session::start("@init DPW:4294967295 DPH:4294967295", 0).unwrap();
        assert_eq!(session.screen_size(), (u32::MAX, u32::MAX));
        assert!(
            sent(&actions).contains(&"|BT UID:btExit X:50 Y:65 W:3865470565 H:429496729 RTO:1000")
        );
    }

    #[test]
    fn toggle_without_marker_updates_both_counters() {
        let mut session = started();
        let mut total = 41;

        let actions = session.handle("@tg1 1", &mut total);
        assert_eq!(sent(&actions), vec![
            r#"@lbCount1 TXT:"Toggles (session): 1""#,
            r#"@lbCount2 TXT:"Toggles (total): 42""#,
        ]);
        assert_eq!(session.count(), 1);
        assert_eq!(total, 42);
    }

    #[test]
    fn marked_toggle_acks_before_effects() {
        let mut session = started();
        let mut total = 0;

        let actions = session.handle("?@tg1 0", &mut total);
        assert_eq!(sent(&actions), vec![
            "@tg1 CRE:1",
            r#"@lbCount1 TXT:"Toggles (session): 1""#,
            r#"@lbCount2 TXT:"Toggles (total): 1""#,
        ]);
    }

    #[test]
    fn toggle_counts_press_and_release_alike() {
        let mut session = started();
        let mut total = 0;

        session.handle("@tg1 1", &mut total);
        session.handle("@tg1 0", &mut total);
        assert_eq!(session.count(), 2);
        assert_eq!(total, 2);
    }

    #[test]
    fn malformed_toggle_still_acks_but_leaves_counters_untouched() {
        let mut session = started();
        let mut total = 5;

        let actions = session.handle("?@tg1 on", &mut total);
        assert_eq!(sent(&actions), vec!["@tg1 CRE:1"]);
        assert_eq!(session.count(), 0);
        assert_eq!(total, 5);
        assert!(session.is_active());
    }

    #[test]
    fn unmarked_malformed_toggle_is_dropped_silently() {
        let mut session = started();
        let mut total = 0;

        let actions = session.handle("@tg1", &mut total);
        assert!(actions.is_empty());
        assert_eq!(session.count(), 0);
        assert_eq!(total, 0);
    }

    #[test]
    fn exit_terminates_and_clears_layout() {
        let mut session = started();
        let mut total = 0;

        let actions = session.handle("?@btExit", &mut total);
        assert_eq!(actions, vec![
            Action::Send(Command::new("@btExit CRE:1")),
            Action::StopClock,
            Action::Send(Command::new("@cls")),
            Action::Send(Command::new("@clh")),
        ]);
        assert!(!session.is_active());
    }

    #[test]
    fn exit_without_marker_sends_no_ack() {
        let mut session = started();
        let mut total = 0;

        let actions = session.handle("@btExit", &mut total);
        assert_eq!(sent(&actions), vec!["@cls", "@clh"]);
    }

    #[test]
    fn unknown_control_is_ignored() {
        let mut session = started();
        let mut total = 0;

        let actions = session.handle("@btSomething 1", &mut total);
        assert!(actions.is_empty());
        assert_eq!(total, 0);
    }

    #[test]
    fn tick_formats_wall_clock_time() {
        let session = started();
        let now = NaiveDate::from_ymd_opt(2020, 5, 17)
            .unwrap()
            .and_hms_opt(13, 4, 9)
            .unwrap();

        let actions = session.tick(now);
        assert_eq!(sent(&actions), vec![r#"@lbTime2 TXT:"2020-05-17 13:04:09""#]);
    }

    #[test]
    fn tick_is_silent_after_exit() {
        let mut session = started();
        let mut total = 0;
        session.handle("@btExit", &mut total);

        let now = NaiveDate::from_ymd_opt(2020, 5, 17)
            .unwrap()
            .and_hms_opt(13, 4, 10)
            .unwrap();
        assert!(session.tick(now).is_empty());
    }
}
