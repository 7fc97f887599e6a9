//! Integration tests for the full tick pipeline:
//! inputs → debounce → link → FSM → status push → display.
//!
//! These run on the host and drive `AppService::tick` with scripted time,
//! exactly as the control loop does on target.  Cadences are compressed
//! (1 s "minutes") so the suites stay fast; the debounce, cooldown, and
//! tamper windows keep their production values since the virtual clock
//! costs nothing.

use crate::mock_hw::{MockHardware, RecordingSink};

use proptimer::app::events::AppEvent;
use proptimer::app::service::AppService;
use proptimer::config::SystemConfig;
use proptimer::fsm::StateId;

const TICK_MS: u32 = 25;
/// Compressed countdown minute.
const MIN_MS: u32 = 1000;

struct Rig {
    app: AppService,
    hw: MockHardware,
    sink: RecordingSink,
    now_ms: u32,
}

impl Rig {
    fn new() -> Self {
        Self::with_config(SystemConfig {
            minute_interval_ms: MIN_MS,
            status_push_interval_ms: 300,
            ..SystemConfig::default()
        })
    }

    fn with_config(config: SystemConfig) -> Self {
        let mut app = AppService::new(config);
        let mut sink = RecordingSink::new();
        app.start(&mut sink);
        Self {
            app,
            hw: MockHardware::new(),
            sink,
            now_ms: 0,
        }
    }

    fn tick(&mut self) {
        self.now_ms += TICK_MS;
        self.app.tick(self.now_ms, &mut self.hw, &mut self.sink);
    }

    fn run_ms(&mut self, ms: u32) {
        for _ in 0..ms / TICK_MS {
            self.tick();
        }
    }

    /// Turn the key and tick until the debounce confirms the arm.
    fn arm(&mut self) {
        self.hw.key_in_arm_position = true;
        self.run_ms(200);
        assert_eq!(self.app.state(), StateId::Armed, "rig failed to arm");
    }

    /// Return the key to safe and wait out settle + the action cooldown.
    fn disarm(&mut self) {
        self.hw.key_in_arm_position = false;
        self.run_ms(1200);
        assert_eq!(self.app.state(), StateId::Defused, "rig failed to disarm");
    }
}

// ── Arming via the key ────────────────────────────────────────

#[test]
fn boots_into_ready_and_paints_the_display() {
    let mut rig = Rig::new();
    rig.tick();
    assert_eq!(rig.app.state(), StateId::Ready);
    assert_eq!(rig.hw.full_repaints(), 1);
    assert!(matches!(rig.sink.events[0], AppEvent::Started(StateId::Ready)));
}

#[test]
fn key_held_in_arm_position_arms_exactly_once() {
    let mut rig = Rig::new();
    rig.hw.key_in_arm_position = true;
    rig.run_ms(5000); // held across many ticks and past the cooldown

    assert_eq!(rig.app.state(), StateId::Armed);
    let to_armed = rig
        .sink
        .state_changes()
        .iter()
        .filter(|e| matches!(e, AppEvent::StateChanged { to: StateId::Armed, .. }))
        .count();
    assert_eq!(to_armed, 1, "held key must not re-trigger arming");
}

#[test]
fn key_chatter_shorter_than_settle_does_not_arm() {
    let mut rig = Rig::new();
    // One 25 ms blip per second — never 50 ms of stability.
    for _ in 0..10 {
        rig.hw.key_in_arm_position = true;
        rig.tick();
        rig.hw.key_in_arm_position = false;
        rig.run_ms(975);
    }
    assert_eq!(rig.app.state(), StateId::Ready);
}

#[test]
fn arming_loads_the_configured_base() {
    let mut rig = Rig::new();
    rig.arm();
    assert_eq!(rig.app.remaining_minutes(), rig.app.base_minutes());
}

// ── Disarming ─────────────────────────────────────────────────

#[test]
fn key_back_to_safe_defuses() {
    let mut rig = Rig::new();
    rig.arm();
    rig.run_ms(2000); // a couple of compressed minutes tick away

    let before = rig.app.remaining_minutes();
    rig.hw.key_in_arm_position = false;
    rig.run_ms(200);

    assert_eq!(rig.app.state(), StateId::Defused);
    assert_eq!(rig.app.remaining_minutes(), before);
}

// ── Countdown ─────────────────────────────────────────────────

#[test]
fn countdown_expires_after_exactly_base_intervals() {
    let mut rig = Rig::with_config(SystemConfig {
        default_minutes: 180,
        minute_interval_ms: 100, // fast cadence, still a multiple of the tick
        ..SystemConfig::default()
    });
    rig.hw.key_in_arm_position = true;
    while rig.app.state() != StateId::Armed {
        rig.tick();
    }
    // The cadence anchor is the tick the FSM armed on.
    let armed_at = rig.now_ms;

    // One tick before the 180th interval the clock still shows 1.
    while rig.now_ms + TICK_MS < armed_at + 180 * 100 {
        rig.tick();
    }
    assert_eq!(rig.app.state(), StateId::Armed);
    assert_eq!(rig.app.remaining_minutes(), 1);

    rig.tick();
    assert_eq!(rig.app.state(), StateId::Expired);
    assert_eq!(rig.app.remaining_minutes(), 0);
}

// ── SET_TIMER ─────────────────────────────────────────────────

#[test]
fn set_timer_while_ready_updates_base_and_remaining() {
    let mut rig = Rig::new();
    rig.hw.inject_line("SET_TIMER:45");
    rig.tick();

    assert_eq!(rig.app.base_minutes(), 45);
    assert_eq!(rig.app.remaining_minutes(), 45);
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::TimerConfigured { minutes: 45 }));
}

#[test]
fn set_timer_rejects_zero_and_overrange() {
    let mut rig = Rig::new();
    let base = rig.app.base_minutes();

    rig.hw.inject_line("SET_TIMER:0");
    rig.hw.inject_line("SET_TIMER:10000");
    rig.run_ms(100);

    assert_eq!(rig.app.base_minutes(), base);
    assert!(!rig
        .sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::TimerConfigured { .. })));
}

#[test]
fn set_timer_while_armed_rewrites_the_running_clock() {
    let mut rig = Rig::new();
    rig.arm();
    rig.run_ms(2500); // part-way into a minute

    rig.hw.inject_line("SET_TIMER:10");
    rig.tick();
    assert_eq!(rig.app.remaining_minutes(), 10);

    // The cadence re-anchored: the next decrement is a full minute out.
    rig.run_ms(MIN_MS - 2 * TICK_MS);
    assert_eq!(rig.app.remaining_minutes(), 10);
    rig.run_ms(2 * TICK_MS);
    assert_eq!(rig.app.remaining_minutes(), 9);
}

#[test]
fn set_timer_in_terminal_state_keeps_the_clock_frozen() {
    let mut rig = Rig::new();
    rig.arm();
    rig.disarm();

    let frozen = rig.app.remaining_minutes();
    rig.hw.inject_line("SET_TIMER:7");
    rig.run_ms(100);

    // Base persists for a future session; the dead clock is untouched.
    assert_eq!(rig.app.base_minutes(), 7);
    assert_eq!(rig.app.remaining_minutes(), frozen);
    assert_eq!(rig.app.state(), StateId::Defused);
}

// ── SUBTRACT ──────────────────────────────────────────────────

#[test]
fn subtract_reduces_the_running_countdown() {
    let mut rig = Rig::new();
    rig.hw.inject_line("SET_TIMER:50");
    rig.tick();
    rig.arm();

    rig.hw.inject_line("SUBTRACT:30");
    rig.tick();
    assert_eq!(rig.app.remaining_minutes(), 20);
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::TimerReduced { by: 30, remaining: 20 }));
}

#[test]
fn subtract_clamps_at_zero_then_expires_on_the_next_tick() {
    let mut rig = Rig::new();
    rig.hw.inject_line("SET_TIMER:10");
    rig.tick();
    rig.arm();

    rig.hw.inject_line("SUBTRACT:30");
    rig.tick(); // applied, clamped to 0; FSM sees Expired on this pass
    assert_eq!(rig.app.remaining_minutes(), 0);
    rig.tick();
    assert_eq!(rig.app.state(), StateId::Expired);
}

#[test]
fn subtract_while_ready_is_a_noop() {
    let mut rig = Rig::new();
    let base = rig.app.base_minutes();

    rig.hw.inject_line("SUBTRACT:30");
    rig.run_ms(100);

    assert_eq!(rig.app.state(), StateId::Ready);
    assert_eq!(rig.app.base_minutes(), base);
    assert!(!rig
        .sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::TimerReduced { .. })));
}

// ── Protocol robustness ───────────────────────────────────────

#[test]
fn command_split_across_reads_still_applies() {
    let mut rig = Rig::new();
    rig.hw.inject("SET_TI");
    rig.tick();
    rig.hw.inject("MER:4");
    rig.tick();
    rig.hw.inject("5\n");
    rig.tick();
    assert_eq!(rig.app.base_minutes(), 45);
}

#[test]
fn garbage_lines_change_nothing() {
    let mut rig = Rig::new();
    let base = rig.app.base_minutes();
    rig.hw.inject_line("HELLO");
    rig.hw.inject_line("SET_TIMER:abc");
    rig.hw.inject_bytes(&[0x01, 0x02, 0xff, b'\n']);
    rig.run_ms(200);

    assert_eq!(rig.app.state(), StateId::Ready);
    assert_eq!(rig.app.base_minutes(), base);
}

// ── Tamper ────────────────────────────────────────────────────

#[test]
fn sustained_tamper_expires_exactly_once() {
    let mut rig = Rig::new();
    rig.arm();

    rig.hw.tamper_a_open = true;
    rig.run_ms(975);
    assert_eq!(rig.app.state(), StateId::Armed, "inside the trigger delay");

    rig.run_ms(500);
    assert_eq!(rig.app.state(), StateId::Expired);

    let to_expired = rig
        .sink
        .state_changes()
        .iter()
        .filter(|e| matches!(e, AppEvent::StateChanged { to: StateId::Expired, .. }))
        .count();
    assert_eq!(to_expired, 1);
}

#[test]
fn tamper_reconnect_before_delay_cancels_cleanly() {
    let mut rig = Rig::new();
    rig.arm();

    rig.hw.tamper_b_open = true;
    rig.run_ms(900);
    rig.hw.tamper_b_open = false;
    rig.run_ms(5000);

    assert_eq!(rig.app.state(), StateId::Armed);
}

#[test]
fn tamper_while_ready_is_ignored() {
    let mut rig = Rig::new();
    rig.hw.tamper_a_open = true;
    rig.hw.tamper_b_open = true;
    rig.run_ms(3000);
    assert_eq!(rig.app.state(), StateId::Ready);

    // Wires restored before arming: the session starts clean.
    rig.hw.tamper_a_open = false;
    rig.hw.tamper_b_open = false;
    rig.arm();
    rig.run_ms(3000);
    assert_eq!(rig.app.state(), StateId::Armed);
}

// ── Terminal-state idempotence ────────────────────────────────

#[test]
fn no_input_escapes_a_terminal_state() {
    for reach_terminal in [false, true] {
        let mut rig = Rig::new();
        rig.arm();
        if reach_terminal {
            // Expire via tamper.
            rig.hw.tamper_a_open = true;
            rig.run_ms(1500);
            assert_eq!(rig.app.state(), StateId::Expired);
        } else {
            rig.disarm();
        }
        let terminal = rig.app.state();

        // Key cycling, tamper flapping, and every protocol command.
        for i in 0..40 {
            rig.hw.key_in_arm_position = i % 2 == 0;
            rig.hw.tamper_a_open = i % 3 == 0;
            rig.hw.inject_line("SET_TIMER:5");
            rig.hw.inject_line("SUBTRACT:1");
            rig.run_ms(500);
            assert_eq!(rig.app.state(), terminal);
        }
    }
}

// ── Status push ───────────────────────────────────────────────

#[test]
fn time_update_pushes_once_per_window_while_armed() {
    let mut rig = Rig::new(); // push window 300 ms
    rig.hw.peer_connected = true;
    rig.arm();
    let armed_at = rig.now_ms;

    while rig.now_ms < armed_at + 3000 {
        rig.tick();
    }
    // 3000 ms / 300 ms window = 10 pushes, give or take tick alignment.
    let pushes = rig.hw.time_updates().len();
    assert!((9..=10).contains(&pushes), "got {pushes} pushes");

    for line in rig.hw.time_updates() {
        assert!(line.ends_with('\n'));
        let payload = line.trim_end().strip_prefix("TIME_UPDATE:").unwrap();
        assert!(payload.parse::<u16>().is_ok());
    }
}

#[test]
fn no_push_without_a_peer() {
    let mut rig = Rig::new();
    rig.hw.peer_connected = false;
    rig.arm();
    rig.run_ms(3000);
    assert!(rig.hw.time_updates().is_empty());
}

#[test]
fn no_push_while_ready_or_after_terminal() {
    let mut rig = Rig::new();
    rig.hw.peer_connected = true;
    rig.run_ms(2000);
    assert!(rig.hw.time_updates().is_empty(), "pushed while Ready");

    rig.arm();
    rig.disarm();

    let at_defuse = rig.hw.time_updates().len();
    rig.run_ms(3000);
    assert_eq!(rig.hw.time_updates().len(), at_defuse, "pushed after Defused");
}

// ── Display reconciliation through the service ────────────────

#[test]
fn display_repaints_on_state_change_and_patches_on_decrement() {
    let mut rig = Rig::new();
    rig.tick();
    assert_eq!(rig.hw.full_repaints(), 1); // Ready screen

    rig.arm();
    assert_eq!(rig.hw.full_repaints(), 2); // Armed screen

    rig.hw.display_ops.clear();
    rig.run_ms(MIN_MS + TICK_MS); // one compressed minute elapses
    // Only the 4-digit field was rewritten, no clear.
    assert_eq!(rig.hw.full_repaints(), 0);
    assert!(rig
        .hw
        .display_ops
        .iter()
        .any(|op| matches!(op, crate::mock_hw::DisplayOp::Write { row: 1, .. })));
}
