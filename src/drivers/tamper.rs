//! Tamper loop supervisor.
//!
//! Two sense wires run through the prop enclosure; opening either one
//! (cut, unplugged, lid lifted) reads HIGH through the pull-up.  The two
//! lines are OR'd — the redundant-wire design maximises sensitivity, so a
//! single intact wire does *not* mask the other being cut.
//!
//! Unlike the key switch there is no debounce here: suppressing a real
//! tamper reading is worse than reacting to a glitch, so the only filter
//! is a trigger delay that tolerates momentary connector chatter.  Once
//! the delay is exceeded the latch is permanent for the arming session;
//! `reset()` is called when the prop is re-armed.
//!
//! The monitor is only evaluated while the system is armed — the FSM
//! simply doesn't call it in other states.

use log::{info, warn};

/// Result of one tamper evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TamperStatus {
    /// Both wires closed.
    Intact,
    /// At least one wire open, trigger delay not yet exceeded.
    Pending { elapsed_ms: u32 },
    /// Open past the trigger delay — latched until `reset()`.
    Triggered,
}

/// Watches the two tamper lines for sustained disconnection.
#[derive(Debug, Clone, Copy)]
pub struct TamperMonitor {
    trigger_delay_ms: u32,
    /// Timestamp of the first open reading of the current episode.
    open_since_ms: Option<u32>,
    triggered: bool,
}

impl TamperMonitor {
    pub fn new(trigger_delay_ms: u32) -> Self {
        Self {
            trigger_delay_ms,
            open_since_ms: None,
            triggered: false,
        }
    }

    /// Clear the latch and any pending episode.  Called on arming.
    pub fn reset(&mut self) {
        if self.triggered {
            info!("tamper: latch cleared for new arming session");
        }
        self.open_since_ms = None;
        self.triggered = false;
    }

    /// Evaluate the current wire levels.  Call once per tick while armed.
    pub fn evaluate(&mut self, line_a_open: bool, line_b_open: bool, now_ms: u32) -> TamperStatus {
        if self.triggered {
            return TamperStatus::Triggered;
        }

        if line_a_open || line_b_open {
            let since = *self.open_since_ms.get_or_insert(now_ms);
            let elapsed_ms = now_ms.wrapping_sub(since);
            if elapsed_ms > self.trigger_delay_ms {
                self.triggered = true;
                warn!(
                    "tamper: wire open for {elapsed_ms} ms (A={line_a_open} B={line_b_open}) — latched"
                );
                return TamperStatus::Triggered;
            }
            return TamperStatus::Pending { elapsed_ms };
        }

        self.open_since_ms = None;
        TamperStatus::Intact
    }

    /// Whether the latch has fired this session.
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }
}
