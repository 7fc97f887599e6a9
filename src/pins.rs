//! GPIO / peripheral pin assignments for the PropTimer main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! All three switch inputs use the internal pull-ups, so an open circuit
//! reads HIGH.  Polarity conventions are fixed by the harness wiring and
//! are translated into logical predicates in `adapters::hardware` — the
//! domain core never sees raw levels.

// ---------------------------------------------------------------------------
// Arm/disarm key switch
// ---------------------------------------------------------------------------

/// Two-position key switch.  LOW = key turned to the arm position,
/// HIGH = key in the disarm/safe position (pull-up, switch shorts to GND).
pub const KEY_SWITCH_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Tamper sense loop
// ---------------------------------------------------------------------------

/// Tamper wire A — routed through the case seam. HIGH = wire cut/unplugged.
pub const TAMPER_A_GPIO: i32 = 5;
/// Tamper wire B — routed through the battery door. HIGH = wire cut/unplugged.
pub const TAMPER_B_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// I²C bus (HD44780 16x2 LCD behind a PCF8574 backpack)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 8;
pub const I2C_SCL_GPIO: i32 = 9;

/// I²C bus clock (100 kHz — the PCF8574 tops out well below fast mode).
pub const I2C_FREQ_HZ: u32 = 100_000;

/// Seven-bit address of the PCF8574 LCD backpack (A0-A2 unbridged).
pub const LCD_I2C_ADDR: u8 = 0x27;
