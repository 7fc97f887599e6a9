//! Cadence-anchored minute countdown.
//!
//! The countdown is driven by wall-clock *intervals*, not a precomputed
//! deadline: every time a full minute interval elapses since the stored
//! anchor, `remaining` drops by exactly one and the anchor moves to "now".
//! Because no end-time is ever computed, external adjustments
//! (`SET_TIMER`, `SUBTRACT`) need no deadline rework — they just edit
//! `remaining` and, where required, re-anchor.
//!
//! Timestamps are milliseconds from the shared monotonic clock; deltas use
//! `wrapping_sub` so u32 rollover is harmless.

use log::info;

/// Upper bound on the configurable base (four display digits).
pub const MAX_BASE_MINUTES: u16 = 9999;

/// What a call to [`CountdownTimer::tick`] observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A minute elapsed; payload is the new remaining value.
    Decremented(u16),
    /// Remaining has reached zero.
    Expired,
}

/// Integer-minute countdown engine.
#[derive(Debug, Clone, Copy)]
pub struct CountdownTimer {
    /// Configured base — survives arm/disarm cycles until changed.
    base_minutes: u16,
    /// Live remaining value, clamped at zero.
    remaining: u16,
    minute_interval_ms: u32,
    /// Anchor of the decrement cadence.
    anchor_ms: u32,
}

impl CountdownTimer {
    pub fn new(base_minutes: u16, minute_interval_ms: u32) -> Self {
        Self {
            base_minutes: base_minutes.clamp(1, MAX_BASE_MINUTES),
            remaining: 0,
            minute_interval_ms,
            anchor_ms: 0,
        }
    }

    /// Load `minutes` into the live countdown and re-anchor the cadence.
    /// Called on arming with the configured base.
    pub fn arm(&mut self, minutes: u16, now_ms: u32) {
        self.remaining = minutes;
        self.anchor_ms = now_ms;
    }

    /// Advance the cadence.  Call once per control tick while armed.
    pub fn tick(&mut self, now_ms: u32) -> Option<TimerEvent> {
        if self.remaining == 0 {
            return Some(TimerEvent::Expired);
        }
        if now_ms.wrapping_sub(self.anchor_ms) < self.minute_interval_ms {
            return None;
        }
        self.anchor_ms = now_ms;
        self.remaining -= 1;
        if self.remaining == 0 {
            Some(TimerEvent::Expired)
        } else {
            Some(TimerEvent::Decremented(self.remaining))
        }
    }

    /// Update the configured base.  Returns `false` (and changes nothing)
    /// outside `1..=9999` — out-of-range requests are inert, not errors.
    /// The live value is untouched; callers that want it reloaded follow
    /// up with [`reload`](Self::reload).
    pub fn set_base(&mut self, minutes: u16) -> bool {
        if minutes == 0 || minutes > MAX_BASE_MINUTES {
            return false;
        }
        self.base_minutes = minutes;
        info!("countdown: base set to {minutes} min");
        true
    }

    /// Overwrite the live value with the base and re-anchor the cadence,
    /// so the first decrement lands a full interval from now.
    pub fn reload(&mut self, now_ms: u32) {
        self.remaining = self.base_minutes;
        self.anchor_ms = now_ms;
    }

    /// Knock `minutes` off the live value, floored at zero.  Zero is a
    /// no-op.  Returns the new remaining value.
    pub fn subtract(&mut self, minutes: u16) -> u16 {
        if minutes > 0 {
            self.remaining = self.remaining.saturating_sub(minutes);
            info!("countdown: subtracted {minutes} min, {} remaining", self.remaining);
        }
        self.remaining
    }

    pub fn remaining(&self) -> u16 {
        self.remaining
    }

    pub fn base_minutes(&self) -> u16 {
        self.base_minutes
    }
}
