//! Inbound commands to the application service.
//!
//! These are what survives of a peer's line after parsing and range
//! validation — the service applies them without re-checking the text.
//! State applicability (e.g. `Subtract` only while armed) is the
//! service's business, not the parser's.

/// Commands the wireless peer can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Set the countdown base (minutes, already validated to `1..=9999`).
    /// Also reloads the live value when the system is READY or ARMED.
    SetTimer(u16),

    /// Knock minutes off the running countdown (already validated `> 0`).
    Subtract(u16),
}
