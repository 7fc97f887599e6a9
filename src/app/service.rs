//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the FSM, the key debouncer, the line assembler, and
//! the display projector, and runs the whole controller one tick at a
//! time.  All I/O flows through port traits injected at call sites, so the
//! entire service runs under test with mock adapters.
//!
//! ```text
//!   InputPort ──▶ ┌─────────────────────────────┐ ──▶ EventSink
//!                 │         AppService          │
//!    LinkPort ◀──▶│  debounce · FSM · protocol  │
//!                 │     countdown · tamper      │
//! DisplayPort ◀── └─────────────────────────────┘
//! ```
//!
//! Per-tick order: sample inputs once → debounce the key → drain the link
//! → FSM tick → status push → display reconcile.  Commands are applied
//! before the FSM tick so a `SET_TIMER` arriving in the same tick as the
//! arm key is already in effect when the countdown loads.

use log::info;

use crate::config::SystemConfig;
use crate::drivers::debounce::DebouncedLine;
use crate::fsm::context::{FsmContext, KeyAction};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::display::DisplayProjector;
use crate::link::line::LineAssembler;
use crate::link::protocol;

use super::commands::Command;
use super::events::AppEvent;
use super::ports::{DisplayPort, EventSink, InputPort, LinkPort};

/// Upper bound on link reads per tick, so a flooding peer cannot stall
/// the control cadence.  64-byte chunks × 8 comfortably exceeds anything
/// a sane peer sends in 25 ms.
const MAX_LINK_READS_PER_TICK: usize = 8;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    /// Debounced arm/disarm key.  Seeded with the disarm level; a key
    /// already turned at boot arms once the settle window passes.
    key: DebouncedLine,
    rx: LineAssembler,
    projector: DisplayProjector,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let key = DebouncedLine::new(false, config.key_settle_ms, config.key_cooldown_ms);
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table(), StateId::Ready);

        Self {
            fsm,
            ctx,
            key,
            rx: LineAssembler::new(),
            projector: DisplayProjector::new(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Start the FSM in its initial state (Ready).
    pub fn start(&mut self, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle.
    ///
    /// The `hw` parameter satisfies **all three** hardware-facing ports —
    /// this avoids a triple mutable borrow while keeping the port
    /// boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl InputPort + LinkPort + DisplayPort),
        sink: &mut impl EventSink,
    ) {
        let prev_state = self.fsm.current_state();

        // 1. One consistent input snapshot for the whole tick.
        let snapshot = hw.sample();
        self.ctx.now_ms = now_ms;
        self.ctx.inputs = snapshot;
        self.ctx.key_action = self
            .key
            .sample(snapshot.key_in_arm_position, now_ms)
            .map(|level| if level { KeyAction::Arm } else { KeyAction::Disarm });

        // 2. Drain the wireless channel and apply complete commands.
        self.poll_link(hw, sink);

        // 3. State logic.
        self.fsm.tick(&mut self.ctx);

        // 4. Periodic status push.
        self.push_status_if_due(now_ms, hw, sink);

        // 5. Reconcile the display with whatever the tick produced.
        let state = self.fsm.current_state();
        self.projector.reconcile(
            state,
            self.ctx.countdown.remaining(),
            self.ctx.countdown.base_minutes(),
            hw,
        );

        // 6. Emit the state change if the FSM moved.
        if state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: state,
            });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Live countdown value (minutes).
    pub fn remaining_minutes(&self) -> u16 {
        self.ctx.countdown.remaining()
    }

    /// Configured countdown base (minutes).
    pub fn base_minutes(&self) -> u16 {
        self.ctx.countdown.base_minutes()
    }

    // ── Internal ──────────────────────────────────────────────

    /// Pull whatever bytes the peer sent, reassemble lines, parse, apply.
    fn poll_link(&mut self, link: &mut impl LinkPort, sink: &mut impl EventSink) {
        let mut chunk = [0u8; 64];
        for _ in 0..MAX_LINK_READS_PER_TICK {
            let n = link.read_pending(&mut chunk);
            if n == 0 {
                return;
            }
            for &byte in &chunk[..n] {
                if let Some(line) = self.rx.feed(byte) {
                    if let Some(cmd) = protocol::parse_line(&line) {
                        self.apply_command(cmd, sink);
                    }
                }
            }
        }
    }

    /// Apply a validated peer command under the current state's rules.
    fn apply_command(&mut self, cmd: Command, sink: &mut impl EventSink) {
        match cmd {
            Command::SetTimer(minutes) => {
                if !self.ctx.countdown.set_base(minutes) {
                    return;
                }
                // The base always updates; only a live (or loadable)
                // countdown also picks the new value up immediately.
                match self.fsm.current_state() {
                    StateId::Ready | StateId::Armed => {
                        self.ctx.countdown.reload(self.ctx.now_ms);
                    }
                    StateId::Defused | StateId::Expired => {}
                }
                sink.emit(&AppEvent::TimerConfigured { minutes });
            }
            Command::Subtract(minutes) => {
                if self.fsm.current_state() != StateId::Armed {
                    return;
                }
                let remaining = self.ctx.countdown.subtract(minutes);
                sink.emit(&AppEvent::TimerReduced {
                    by: minutes,
                    remaining,
                });
            }
        }
    }

    /// Send `TIME_UPDATE:` when armed, connected, and the window elapsed.
    fn push_status_if_due(
        &mut self,
        now_ms: u32,
        link: &mut impl LinkPort,
        sink: &mut impl EventSink,
    ) {
        if self.fsm.current_state() != StateId::Armed || !link.peer_connected() {
            return;
        }
        let interval = self.ctx.config.status_push_interval_ms;
        if now_ms.wrapping_sub(self.ctx.status_anchor_ms) < interval {
            return;
        }
        let remaining = self.ctx.countdown.remaining();
        link.send_line(&protocol::time_update_line(remaining));
        self.ctx.status_anchor_ms = now_ms;
        sink.emit(&AppEvent::StatusPushed { remaining });
    }
}
