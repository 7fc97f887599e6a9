//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (GPIO, LCD, TCP link, log sink) implement these traits.
//! The [`AppService`](super::service::AppService) consumes them via
//! generics, so the domain core never touches hardware directly and the
//! whole controller runs under test with mock adapters.

use crate::fsm::context::InputSnapshot;

use super::events::AppEvent;

// ───────────────────────────────────────────────────────────────
// Digital input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the key switch and tamper wires.
///
/// Implementations translate raw pin levels into the named predicates of
/// [`InputSnapshot`] (pull-up conventions: key LOW = arm position, tamper
/// HIGH = open).  The service calls this exactly once per tick.
pub trait InputPort {
    fn sample(&mut self) -> InputSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Wireless link port (driven adapter: domain ↔ peer)
// ───────────────────────────────────────────────────────────────

/// Non-blocking byte channel to the paired peer.
///
/// `read_pending` must never block: return whatever bytes are available
/// (possibly a partial line) or 0.  A missing line terminator therefore
/// cannot stall the control tick.  Write failures are the adapter's to
/// absorb — the domain treats sends as best-effort.
pub trait LinkPort {
    /// Copy available bytes into `buf`; returns the count (0 = nothing).
    fn read_pending(&mut self, buf: &mut [u8]) -> usize;

    /// Send a complete line (terminator included), best-effort.
    fn send_line(&mut self, line: &str);

    /// Whether a peer is currently connected.
    fn peer_connected(&self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → two-line text sink)
// ───────────────────────────────────────────────────────────────

/// Fixed-width two-line character display.
///
/// The domain computes content and decides full vs partial redraws; the
/// adapter owns the physical rendering.  Out-of-bounds writes are the
/// adapter's to clip.
pub trait DisplayPort {
    fn clear(&mut self);
    fn write_at(&mut self, col: u8, row: u8, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go (serial log in production, a vec in tests).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
