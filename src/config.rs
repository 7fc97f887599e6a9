//! System configuration parameters
//!
//! All tunable parameters for the PropTimer controller.  Constructed once
//! at boot and injected into the application service; there is no runtime
//! persistence, so a power cycle always returns to these values.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Countdown ---
    /// Countdown base loaded on arming, until overridden by `SET_TIMER` (minutes)
    pub default_minutes: u16,
    /// Wall-clock interval between countdown decrements (milliseconds).
    /// 60 000 in the field; tests and bench props compress it.
    pub minute_interval_ms: u32,

    // --- Key switch debounce ---
    /// Raw level must hold this long before a transition is confirmed (ms)
    pub key_settle_ms: u32,
    /// Minimum spacing between two confirmed key actions (ms)
    pub key_cooldown_ms: u32,

    // --- Tamper ---
    /// Either sense wire open for longer than this trips the tamper latch (ms)
    pub tamper_delay_ms: u32,

    // --- Wireless link ---
    /// Soft-AP SSID the peer handset joins
    pub ap_ssid: heapless::String<32>,
    /// Soft-AP password (empty = open network)
    pub ap_password: heapless::String<64>,
    /// TCP port of the line-oriented command channel
    pub link_port: u16,
    /// `TIME_UPDATE:` push cadence while armed with a peer connected (ms)
    pub status_push_interval_ms: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Countdown
            default_minutes: 45,
            minute_interval_ms: 60_000,

            // Key switch
            key_settle_ms: 50,
            key_cooldown_ms: 1_000,

            // Tamper
            tamper_delay_ms: 1_000,

            // Wireless link
            ap_ssid: heapless::String::try_from("PROPTIMER").unwrap_or_default(),
            ap_password: heapless::String::new(),
            link_port: 3333,
            status_push_interval_ms: 30_000,

            // Timing
            control_loop_interval_ms: 25, // 40 Hz — well inside the 50 ms settle window
        }
    }
}
