//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap.  The transition graph is deliberately one-way past
//! arming:
//!
//! ```text
//!  READY ──[key → arm]──▶ ARMED ──[key → disarm]──▶ DEFUSED (terminal)
//!                           │
//!              [countdown expired  OR
//!               tamper wire open > delay]
//!                           ▼
//!                        EXPIRED (terminal)
//! ```
//!
//! Countdown expiry and tamper trigger merge into the same terminal state
//! with no cause field; the tamper latch logs its own warning, which is
//! the only place the distinction survives.

use super::context::{FsmContext, KeyAction};
use super::{StateDescriptor, StateId};
use crate::countdown::TimerEvent;
use crate::drivers::tamper::TamperStatus;
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Ready
        StateDescriptor {
            id: StateId::Ready,
            name: "Ready",
            on_enter: Some(ready_enter),
            on_exit: None,
            on_update: ready_update,
        },
        // Index 1 — Armed
        StateDescriptor {
            id: StateId::Armed,
            name: "Armed",
            on_enter: Some(armed_enter),
            on_exit: None,
            on_update: armed_update,
        },
        // Index 2 — Defused
        StateDescriptor {
            id: StateId::Defused,
            name: "Defused",
            on_enter: Some(defused_enter),
            on_exit: None,
            on_update: terminal_update,
        },
        // Index 3 — Expired
        StateDescriptor {
            id: StateId::Expired,
            name: "Expired",
            on_enter: Some(expired_enter),
            on_exit: None,
            on_update: terminal_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  READY state — waiting for the key
// ═══════════════════════════════════════════════════════════════════════════

fn ready_enter(ctx: &mut FsmContext) {
    info!(
        "READY: base {} min, waiting for arm key",
        ctx.countdown.base_minutes()
    );
}

fn ready_update(ctx: &mut FsmContext) -> Option<StateId> {
    // Only a confirmed key turn arms; tamper wires are inert here so the
    // crew can open the case for staging without consequences.
    if ctx.key_action == Some(KeyAction::Arm) {
        return Some(StateId::Armed);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ARMED state — countdown running, tamper loop live
// ═══════════════════════════════════════════════════════════════════════════

fn armed_enter(ctx: &mut FsmContext) {
    let base = ctx.countdown.base_minutes();
    ctx.countdown.arm(base, ctx.now_ms);
    ctx.tamper.reset();
    ctx.status_anchor_ms = ctx.now_ms;
    info!("ARMED: counting down from {base} min");
}

fn armed_update(ctx: &mut FsmContext) -> Option<StateId> {
    // Key back to the safe position wins over everything else this tick.
    if ctx.key_action == Some(KeyAction::Disarm) {
        return Some(StateId::Defused);
    }

    // Tamper loop, then countdown.  Both funnel into Expired; whichever
    // is noticed first in a tick wins, and the transition is idempotent.
    let tamper = ctx.tamper.evaluate(
        ctx.inputs.tamper_a_open,
        ctx.inputs.tamper_b_open,
        ctx.now_ms,
    );
    if tamper == TamperStatus::Triggered {
        return Some(StateId::Expired);
    }

    match ctx.countdown.tick(ctx.now_ms) {
        Some(TimerEvent::Expired) => Some(StateId::Expired),
        Some(TimerEvent::Decremented(remaining)) => {
            info!("ARMED: {remaining} min remaining");
            None
        }
        None => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Terminal states
// ═══════════════════════════════════════════════════════════════════════════

fn defused_enter(ctx: &mut FsmContext) {
    info!(
        "DEFUSED: key returned to safe with {} min on the clock",
        ctx.countdown.remaining()
    );
}

fn expired_enter(ctx: &mut FsmContext) {
    warn!(
        "EXPIRED: countdown/tamper terminal (remaining {} min)",
        ctx.countdown.remaining()
    );
}

/// Terminal states accept no input; only a power cycle leaves them.
fn terminal_update(_ctx: &mut FsmContext) -> Option<StateId> {
    None
}
