//! Fuzz target: `LineAssembler::feed`
//!
//! Drives arbitrary byte sequences into the streaming line assembler and
//! asserts that it never panics, never yields an oversize or unterminated
//! line, and resynchronises cleanly after a `clear()`.
//!
//! cargo fuzz run fuzz_line_assembler

#![no_main]

use libfuzzer_sys::fuzz_target;
use proptimer::link::line::{LineAssembler, MAX_LINE_LEN};

fuzz_target!(|data: &[u8]| {
    let mut asm = LineAssembler::new();

    for &b in data {
        if let Some(line) = asm.feed(b) {
            assert!(line.len() <= MAX_LINE_LEN, "line exceeds MAX_LINE_LEN");
            assert!(!line.as_str().contains('\n'), "terminator leaked into line");
            assert!(!line.as_str().ends_with('\r'), "CR leaked into line");
        }
    }

    // After a reset the assembler must accept bytes cleanly again.
    asm.clear();
    for &b in data {
        let _ = asm.feed(b);
    }
});
