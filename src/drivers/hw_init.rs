//! One-shot hardware peripheral initialization.
//!
//! Configures the switch-input GPIOs and the I²C master for the LCD
//! backpack using raw ESP-IDF sys calls.  Called once from `main()` before
//! the control loop starts.  On non-espidf targets everything here is a
//! simulation stub so the library compiles and tests on the host.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    I2cInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={rc})"),
            Self::I2cInitFailed(rc) => write!(f, "I2C master init failed (rc={rc})"),
        }
    }
}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_i2c()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // Key and both tamper wires: inputs with pull-ups, no interrupts —
    // everything is polled once per control tick.
    let input_pins = [
        pins::KEY_SWITCH_GPIO,
        pins::TAMPER_A_GPIO,
        pins::TAMPER_B_GPIO,
    ];

    for &pin in &input_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    info!("hw_init: GPIO inputs configured (key, tamper A/B)");
    Ok(())
}

/// Read a configured input pin.  `true` = HIGH.
#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Simulation levels: key resting in the disarm position (HIGH through
/// the pull-up), tamper loops closed (LOW).
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    !matches!(pin, pins::TAMPER_A_GPIO | pins::TAMPER_B_GPIO)
}

// ── I²C master (LCD backpack) ─────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_i2c() -> Result<(), HwInitError> {
    let mut cfg: i2c_config_t = Default::default();
    cfg.mode = i2c_mode_t_I2C_MODE_MASTER;
    cfg.sda_io_num = pins::I2C_SDA_GPIO;
    cfg.scl_io_num = pins::I2C_SCL_GPIO;
    cfg.sda_pullup_en = true;
    cfg.scl_pullup_en = true;
    cfg.__bindgen_anon_1.master.clk_speed = pins::I2C_FREQ_HZ;

    // SAFETY: port 0 is configured and installed exactly once at boot.
    let ret = unsafe { i2c_param_config(i2c_port_t_I2C_NUM_0, &cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::I2cInitFailed(ret));
    }
    let ret = unsafe { i2c_driver_install(i2c_port_t_I2C_NUM_0, i2c_mode_t_I2C_MODE_MASTER, 0, 0, 0) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::I2cInitFailed(ret));
    }

    info!("hw_init: I2C master ready (SDA={}, SCL={})", pins::I2C_SDA_GPIO, pins::I2C_SCL_GPIO);
    Ok(())
}

/// Write raw bytes to an I²C device.  Returns the ESP-IDF error code on
/// failure.
#[cfg(target_os = "espidf")]
pub fn i2c_write(addr: u8, bytes: &[u8]) -> Result<(), i32> {
    // SAFETY: the I2C driver was installed in init_i2c() before any
    // caller can reach this; main-loop access only.
    let ret = unsafe {
        i2c_master_write_to_device(
            i2c_port_t_I2C_NUM_0,
            addr,
            bytes.as_ptr(),
            bytes.len(),
            100, // ticks — generous for a 100 kHz bus
        )
    };
    if ret == ESP_OK as i32 { Ok(()) } else { Err(ret) }
}

#[cfg(not(target_os = "espidf"))]
pub fn i2c_write(_addr: u8, _bytes: &[u8]) -> Result<(), i32> {
    Ok(())
}

// ── Busy-wait delay (HD44780 command timing) ──────────────────

#[cfg(target_os = "espidf")]
pub fn delay_us(us: u32) {
    // SAFETY: esp_rom_delay_us is a calibrated busy-wait; safe anywhere.
    unsafe { esp_rom_delay_us(us) };
}

#[cfg(not(target_os = "espidf"))]
pub fn delay_us(_us: u32) {}
