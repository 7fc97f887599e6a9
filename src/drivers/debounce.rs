//! Settle-and-cooldown debounce for a two-position switch.
//!
//! ## Hardware
//!
//! The arm/disarm key is a mechanical switch on a pulled-up GPIO, polled
//! once per control tick.  Contact bounce shows up as sub-millisecond level
//! chatter; a worn key barrel can also re-make contact when the prop is
//! jostled.  Two windows filter both:
//!
//! | Window    | Duration | Rejects                                     |
//! |-----------|----------|---------------------------------------------|
//! | settle    | 50 ms    | electrical noise / contact bounce           |
//! | cooldown  | 1000 ms  | one physical turn firing multiple actions   |
//!
//! A transition is confirmed only when the raw level has sat still for the
//! full settle window *and* the cooldown since the previous confirmed
//! action has elapsed.

/// Debounced two-level digital line.
///
/// Timestamps are milliseconds from the shared monotonic clock; all
/// comparisons use `wrapping_sub` so the ~49-day u32 rollover is harmless.
#[derive(Debug, Clone, Copy)]
pub struct DebouncedLine {
    settle_ms: u32,
    cooldown_ms: u32,
    /// Last raw reading.
    raw: bool,
    /// Last confirmed logical level.
    confirmed: bool,
    /// When the raw level last changed.
    last_change_ms: u32,
    /// When a transition was last confirmed.  `None` until the first one,
    /// so the cooldown never blocks the initial actuation.
    last_action_ms: Option<u32>,
}

impl DebouncedLine {
    /// `initial` seeds both the raw and confirmed level — pass the level
    /// the line is expected to rest at on boot.
    pub fn new(initial: bool, settle_ms: u32, cooldown_ms: u32) -> Self {
        Self {
            settle_ms,
            cooldown_ms,
            raw: initial,
            confirmed: initial,
            last_change_ms: 0,
            last_action_ms: None,
        }
    }

    /// Feed one raw sample.  Returns `Some(level)` exactly when a new
    /// logical level is confirmed; otherwise `None`.
    pub fn sample(&mut self, raw: bool, now_ms: u32) -> Option<bool> {
        if raw != self.raw {
            self.raw = raw;
            self.last_change_ms = now_ms;
        }

        if raw == self.confirmed {
            return None;
        }
        if now_ms.wrapping_sub(self.last_change_ms) < self.settle_ms {
            return None;
        }
        if let Some(t) = self.last_action_ms {
            if now_ms.wrapping_sub(t) < self.cooldown_ms {
                return None;
            }
        }

        self.confirmed = raw;
        self.last_action_ms = Some(now_ms);
        Some(raw)
    }

    /// The current confirmed logical level.
    pub fn confirmed_level(&self) -> bool {
        self.confirmed
    }
}
