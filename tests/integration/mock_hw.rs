//! Mock hardware adapter for integration tests.
//!
//! One struct stands in for the GPIO bank, the TCP link, and the LCD, so
//! the full `AppService::tick` pipeline runs against scripted inputs and
//! every outbound effect (sent lines, display writes, events) is recorded
//! for assertions.

use std::collections::VecDeque;

use proptimer::app::events::AppEvent;
use proptimer::app::ports::{DisplayPort, EventSink, InputPort, LinkPort};
use proptimer::fsm::context::InputSnapshot;

// ── Display call record ───────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Clear,
    Write { col: u8, row: u8, text: String },
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Scripted logical input levels.
    pub key_in_arm_position: bool,
    pub tamper_a_open: bool,
    pub tamper_b_open: bool,

    /// Bytes "on the wire" from the peer, drained by `read_pending`.
    pub inbound: VecDeque<u8>,
    /// Complete lines pushed out to the peer.
    pub sent_lines: Vec<String>,
    pub peer_connected: bool,

    /// Every display port call, in order.
    pub display_ops: Vec<DisplayOp>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            key_in_arm_position: false,
            tamper_a_open: false,
            tamper_b_open: false,
            inbound: VecDeque::new(),
            sent_lines: Vec::new(),
            peer_connected: false,
            display_ops: Vec::new(),
        }
    }

    /// Queue raw bytes as if the peer had sent them.
    pub fn inject(&mut self, bytes: &str) {
        self.inbound.extend(bytes.bytes());
    }

    /// Queue arbitrary (possibly non-UTF-8) bytes.
    pub fn inject_bytes(&mut self, bytes: &[u8]) {
        self.inbound.extend(bytes.iter().copied());
    }

    /// Queue a complete command line.
    pub fn inject_line(&mut self, line: &str) {
        self.inject(line);
        self.inject("\n");
    }

    pub fn time_updates(&self) -> Vec<&str> {
        self.sent_lines
            .iter()
            .filter(|l| l.starts_with("TIME_UPDATE:"))
            .map(String::as_str)
            .collect()
    }

    pub fn full_repaints(&self) -> usize {
        self.display_ops
            .iter()
            .filter(|op| matches!(op, DisplayOp::Clear))
            .count()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockHardware {
    fn sample(&mut self) -> InputSnapshot {
        InputSnapshot {
            key_in_arm_position: self.key_in_arm_position,
            tamper_a_open: self.tamper_a_open,
            tamper_b_open: self.tamper_b_open,
        }
    }
}

impl LinkPort for MockHardware {
    fn read_pending(&mut self, buf: &mut [u8]) -> usize {
        let mut n = 0;
        while n < buf.len() {
            match self.inbound.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        n
    }

    fn send_line(&mut self, line: &str) {
        self.sent_lines.push(line.to_string());
    }

    fn peer_connected(&self) -> bool {
        self.peer_connected
    }
}

impl DisplayPort for MockHardware {
    fn clear(&mut self) {
        self.display_ops.push(DisplayOp::Clear);
    }

    fn write_at(&mut self, col: u8, row: u8, text: &str) {
        self.display_ops.push(DisplayOp::Write {
            col,
            row,
            text: text.to_string(),
        });
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn state_changes(&self) -> Vec<AppEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::StateChanged { .. }))
            .copied()
            .collect()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
