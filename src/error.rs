#![allow(dead_code)] // Funnel variants reserved for typed boot-path returns

//! Unified error types for the PropTimer firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! top-level boot path's error handling uniform.  All variants are `Copy` so
//! they can be passed around freely without allocation.  Note that invalid
//! *protocol* input is not an error at all — it resolves to "no state
//! change" inside the parser and never reaches these types.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible boot-time operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The wireless command channel failed.
    Link(LinkError),
    /// The LCD could not be driven.
    Display(DisplayError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Link(e) => write!(f, "link: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Wireless link errors
// ---------------------------------------------------------------------------

/// Failures on the TCP command channel.  Everything past `bind` is handled
/// inside the adapter by dropping the peer; only `BindFailed` surfaces to
/// the boot path, where it downgrades the system to local-only mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The listening socket could not be bound.
    BindFailed,
    /// The socket could not be switched to non-blocking mode.
    NonBlockingFailed,
    /// A write to the peer failed.
    WriteFailed,
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BindFailed => write!(f, "bind failed"),
            Self::NonBlockingFailed => write!(f, "non-blocking mode unavailable"),
            Self::WriteFailed => write!(f, "peer write failed"),
        }
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// An I²C transaction to the backpack failed (ESP-IDF error code).
    BusWriteFailed(i32),
    /// A write was attempted before `init()` completed.
    NotInitialised,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BusWriteFailed(rc) => write!(f, "I2C write failed (rc={rc})"),
            Self::NotInitialised => write!(f, "LCD not initialised"),
        }
    }
}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
