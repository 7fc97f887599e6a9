//! Command grammar.
//!
//! Prefix-dispatched, line-oriented:
//!
//! | Prefix       | Payload         | Produces            |
//! |--------------|-----------------|---------------------|
//! | `SET_TIMER:` | minutes 1..=9999| `Command::SetTimer` |
//! | `SUBTRACT:`  | minutes > 0     | `Command::Subtract` |
//!
//! Anything else — unknown prefixes, malformed digits, out-of-range
//! values — parses to `None` and is logged at debug level.  Malformed
//! integers deliberately collapse to the 0 sentinel and fall out through
//! the range checks, so there is no error path at all.
//!
//! Outbound traffic is a single message, `TIME_UPDATE:<minutes>\n`.

use core::fmt::Write as _;

use log::debug;

use crate::app::commands::Command;
use crate::countdown::MAX_BASE_MINUTES;

/// Parse one trimmed line into a command, or `None` for inert input.
pub fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();

    if let Some(payload) = line.strip_prefix("SET_TIMER:") {
        let n = parse_minutes(payload);
        if n >= 1 && n <= u32::from(MAX_BASE_MINUTES) {
            return Some(Command::SetTimer(n as u16));
        }
        debug!("protocol: SET_TIMER payload {payload:?} out of range, ignored");
        return None;
    }

    if let Some(payload) = line.strip_prefix("SUBTRACT:") {
        let n = parse_minutes(payload);
        if n >= 1 {
            return Some(Command::Subtract(n.min(u32::from(u16::MAX)) as u16));
        }
        debug!("protocol: SUBTRACT payload {payload:?} rejected, ignored");
        return None;
    }

    if !line.is_empty() {
        debug!("protocol: unrecognized line {line:?}, ignored");
    }
    None
}

/// Malformed digits become 0, which every range check rejects.
fn parse_minutes(payload: &str) -> u32 {
    payload.trim().parse::<u32>().unwrap_or(0)
}

/// Render the periodic status push, newline included.
pub fn time_update_line(remaining: u16) -> heapless::String<24> {
    let mut line = heapless::String::new();
    // Cannot overflow: "TIME_UPDATE:" + at most 5 digits + '\n' is 18 bytes.
    let _ = write!(line, "TIME_UPDATE:{remaining}\n");
    line
}
