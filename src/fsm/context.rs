//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to: the per-tick input snapshot, the countdown engine, the tamper
//! monitor, timing, and configuration.  The service fills in the snapshot
//! and the clock before each tick; the handlers own everything else.

use crate::config::SystemConfig;
use crate::countdown::CountdownTimer;
use crate::drivers::tamper::TamperMonitor;

// ---------------------------------------------------------------------------
// Input snapshot (written once per tick by the service)
// ---------------------------------------------------------------------------

/// Logical input levels, sampled exactly once per tick so every handler
/// decision within that tick sees the same world.  Polarity mapping from
/// raw GPIO levels happens in the hardware adapter — these are already
/// named predicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// Key turned to the arm position.
    pub key_in_arm_position: bool,
    /// Tamper wire A reads open-circuit.
    pub tamper_a_open: bool,
    /// Tamper wire B reads open-circuit.
    pub tamper_b_open: bool,
}

/// A debounced, cooldown-gated key actuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Confirmed transition to the arm position.
    Arm,
    /// Confirmed transition to the disarm position.
    Disarm,
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Monotonic clock at the start of this tick (milliseconds).
    pub now_ms: u32,

    // -- Inputs --
    /// Raw-but-logical levels for this tick.
    pub inputs: InputSnapshot,
    /// Debounced key actuation confirmed this tick, if any.
    pub key_action: Option<KeyAction>,

    // -- Owned domain engines --
    pub countdown: CountdownTimer,
    pub tamper: TamperMonitor,

    /// Anchor of the `TIME_UPDATE:` push cadence.  Reset on arming; the
    /// service consumes it when deciding whether a push is due.
    pub status_anchor_ms: u32,

    // -- Configuration --
    pub config: SystemConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: SystemConfig) -> Self {
        let countdown = CountdownTimer::new(config.default_minutes, config.minute_interval_ms);
        let tamper = TamperMonitor::new(config.tamper_delay_ms);
        Self {
            now_ms: 0,
            inputs: InputSnapshot::default(),
            key_action: None,
            countdown,
            tamper,
            status_anchor_ms: 0,
            config,
        }
    }
}
