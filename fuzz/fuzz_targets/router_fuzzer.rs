//! Fuzz target for routing arbitrary protocol lines
//!
//! # Strategy
//!
//! - Arbitrary line text (any sentinel, any token soup)
//! - Occasional well-formed init/toggle/exit lines mixed in
//!
//! # Invariants
//!
//! - The cumulative count is monotonically non-decreasing
//! - Only a malformed `@init` line returns an error
//! - NEVER panic on any line

#![no_main]

use arbitrary::Arbitrary;
use guio_app::Router;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum FuzzLine {
    Raw(String),
    Init { width: u32, height: u32 },
    Toggle { ack: bool, state: i16 },
    Exit { ack: bool },
}

impl FuzzLine {
    fn render(&self) -> String {
        match self {
            Self::Raw(text) => text.clone(),
            Self::Init { width, height } => format!("$@init DPW:{width} DPH:{height}"),
            Self::Toggle { ack, state } => {
                format!("${}@tg1 {state}", if *ack { "?" } else { "" })
            },
            Self::Exit { ack } => format!("${}@btExit", if *ack { "?" } else { "" }),
        }
    }
}

fuzz_target!(|lines: Vec<FuzzLine>| {
    let mut router = Router::new();
    let mut previous_total = 0u64;

    for line in &lines {
        let rendered = line.render();
        if rendered.contains('\r') || rendered.contains('\n') {
            continue;
        }

        let result = router.route(&rendered);
        if result.is_err() {
            assert!(rendered.starts_with("$@init "));
        }

        assert!(router.total() >= previous_total);
        previous_total = router.total();
    }
});
