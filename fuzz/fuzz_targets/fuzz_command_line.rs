//! Fuzz target: the full inbound pipeline, `LineAssembler` → `parse_line`.
//!
//! Whatever a peer sends, the pipeline must never panic and must only
//! ever produce range-valid commands — out-of-range and malformed input
//! is inert by design.
//!
//! cargo fuzz run fuzz_command_line

#![no_main]

use libfuzzer_sys::fuzz_target;
use proptimer::app::commands::Command;
use proptimer::link::line::LineAssembler;
use proptimer::link::protocol::parse_line;

fuzz_target!(|data: &[u8]| {
    let mut asm = LineAssembler::new();

    for &b in data {
        if let Some(line) = asm.feed(b) {
            match parse_line(&line) {
                Some(Command::SetTimer(n)) => assert!((1..=9999).contains(&n)),
                Some(Command::Subtract(n)) => assert!(n >= 1),
                None => {}
            }
        }
    }
});
