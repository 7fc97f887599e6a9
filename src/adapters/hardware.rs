//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the LCD driver and the TCP link, and reads the switch GPIOs,
//! exposing the lot through [`InputPort`], [`LinkPort`] and
//! [`DisplayPort`] as the single `hw` object the service ticks against.
//! This is the only module that knows the board's polarity conventions;
//! past this point everything is a named logical predicate.

use log::warn;

use crate::app::ports::{DisplayPort, InputPort, LinkPort};
use crate::drivers::hw_init;
use crate::drivers::lcd1602::Lcd1602;
use crate::fsm::context::InputSnapshot;
use crate::pins;

use super::tcp_link::TcpLinkAdapter;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    lcd: Lcd1602,
    link: TcpLinkAdapter,
    /// LCD bus faults are logged once, not once per tick.
    display_fault_logged: bool,
}

impl HardwareAdapter {
    pub fn new(lcd: Lcd1602, link: TcpLinkAdapter) -> Self {
        Self {
            lcd,
            link,
            display_fault_logged: false,
        }
    }

    fn note_display_fault(&mut self, what: &str, e: crate::error::DisplayError) {
        if !self.display_fault_logged {
            warn!("display: {what} failed ({e}) — suppressing further display errors");
            self.display_fault_logged = true;
        }
    }
}

// ── InputPort implementation ──────────────────────────────────

impl InputPort for HardwareAdapter {
    fn sample(&mut self) -> InputSnapshot {
        // Pull-up conventions: key LOW = arm position; tamper HIGH = open.
        InputSnapshot {
            key_in_arm_position: !hw_init::gpio_read(pins::KEY_SWITCH_GPIO),
            tamper_a_open: hw_init::gpio_read(pins::TAMPER_A_GPIO),
            tamper_b_open: hw_init::gpio_read(pins::TAMPER_B_GPIO),
        }
    }
}

// ── DisplayPort implementation ────────────────────────────────

impl DisplayPort for HardwareAdapter {
    fn clear(&mut self) {
        if let Err(e) = self.lcd.clear_all() {
            self.note_display_fault("clear", e);
        }
    }

    fn write_at(&mut self, col: u8, row: u8, text: &str) {
        let result = self
            .lcd
            .set_cursor(col, row)
            .and_then(|()| self.lcd.print(text));
        if let Err(e) = result {
            self.note_display_fault("write", e);
        }
    }
}

// ── LinkPort implementation ───────────────────────────────────

impl LinkPort for HardwareAdapter {
    fn read_pending(&mut self, buf: &mut [u8]) -> usize {
        self.link.read_pending(buf)
    }

    fn send_line(&mut self, line: &str) {
        self.link.send_line(line);
    }

    fn peer_connected(&self) -> bool {
        self.link.peer_connected()
    }
}
