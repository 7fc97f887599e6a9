//! Streaming line assembler.
//!
//! The link adapter hands over whatever bytes happened to be readable —
//! part of a line, several lines glued together, or nothing.  The
//! assembler accumulates bytes until a `\n` and yields the completed line
//! with the terminator and any trailing `\r` stripped.  A missing
//! terminator therefore never stalls anything: the partial line just waits
//! in the buffer for the next tick's bytes.
//!
//! Oversize input (no terminator within the buffer capacity) switches the
//! assembler into discard mode until the next `\n`, then resynchronises.
//! Non-UTF-8 lines are dropped the same way.  Both are inert by design of
//! the protocol's error taxonomy.

use heapless::Vec;

/// Longest accepted line including the prefix and payload digits.
pub const MAX_LINE_LEN: usize = 64;

/// A completed, terminator-stripped line.
pub type Line = heapless::String<MAX_LINE_LEN>;

/// Reassembles `\n`-terminated lines from a byte stream.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buf: Vec<u8, MAX_LINE_LEN>,
    /// Set while discarding an oversize line.
    overflowed: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte.  Returns `Some(line)` when a line completes.
    pub fn feed(&mut self, byte: u8) -> Option<Line> {
        if byte == b'\n' {
            let overflowed = core::mem::take(&mut self.overflowed);
            let mut raw = core::mem::take(&mut self.buf);
            if overflowed {
                return None;
            }
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
            let text = core::str::from_utf8(&raw).ok()?;
            let mut line = Line::new();
            // Cannot fail: `raw` is at most MAX_LINE_LEN bytes.
            let _ = line.push_str(text);
            return Some(line);
        }

        if !self.overflowed && self.buf.push(byte).is_err() {
            self.overflowed = true;
            self.buf.clear();
        }
        None
    }

    /// Drop any partial line (e.g. after the peer disconnects).
    pub fn clear(&mut self) {
        self.buf.clear();
        self.overflowed = false;
    }
}
