//! PropTimer Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single cooperative polling loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Adapters (outer ring)                    │
//! │                                                              │
//! │  HardwareAdapter       WifiApAdapter      LogEventSink       │
//! │  (GPIO + LCD + TCP)    (soft-AP)          (EventSink)        │
//! │  Esp32TimeAdapter                                            │
//! │  (monotonic clock)                                           │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              AppService (pure logic)                   │  │
//! │  │  debounce · FSM · countdown · tamper · protocol        │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Boot policy: a dead peripheral bus halts (the prop is not safe to run
//! blind); a dead display or wireless layer logs once and degrades — the
//! key, tamper loop, and countdown keep working regardless.
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod error;
mod pins;

pub mod app;
mod adapters;
pub mod countdown;
pub mod display;
mod drivers;
pub mod fsm;
pub mod link;

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use adapters::hardware::HardwareAdapter;
use adapters::log_sink::LogEventSink;
use adapters::tcp_link::TcpLinkAdapter;
use adapters::time::Esp32TimeAdapter;
use adapters::wifi::WifiApAdapter;
use app::service::AppService;
use config::SystemConfig;
use drivers::lcd1602::Lcd1602;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  PropTimer v{}                     ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();

    // ── 2. Peripheral bus — required precondition ─────────────
    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Inputs unreadable means the prop cannot be operated safely —
        // halt and let the watchdog/power cycle sort it out.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Display — degrade to headless on failure ───────────
    let mut lcd = Lcd1602::new(pins::LCD_I2C_ADDR);
    if let Err(e) = lcd.init() {
        warn!("LCD init failed ({}), continuing headless", e);
    }

    // ── 4. Wireless — degrade to local-only on failure ────────
    // `wifi` stays bound for the lifetime of main so the AP outlives
    // every tick of the loop below.
    let mut wifi = match WifiApAdapter::new(config.ap_ssid.as_str(), config.ap_password.as_str()) {
        Ok(ap) => Some(ap),
        Err(e) => {
            warn!("wireless config invalid ({}), local controls only", e);
            None
        }
    };
    let wireless_up = match wifi.as_mut() {
        Some(ap) => match ap.start() {
            Ok(()) => true,
            Err(e) => {
                warn!("soft-AP start failed ({}), local controls only", e);
                false
            }
        },
        None => false,
    };
    let link = if wireless_up {
        TcpLinkAdapter::bind(config.link_port).unwrap_or_else(|e| {
            warn!("command channel unavailable ({}), local controls only", e);
            TcpLinkAdapter::offline()
        })
    } else {
        TcpLinkAdapter::offline()
    };

    // ── 5. Construct adapters and the app service ─────────────
    let mut hw = HardwareAdapter::new(lcd, link);
    let mut sink = LogEventSink::new();
    let time = Esp32TimeAdapter::new();

    let mut app = AppService::new(config.clone());
    app.start(&mut sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        #[cfg(target_os = "espidf")]
        esp_idf_hal::delay::FreeRtos::delay_ms(config.control_loop_interval_ms);

        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(std::time::Duration::from_millis(
            config.control_loop_interval_ms as u64,
        ));

        let now_ms = time.uptime_ms();
        app.tick(now_ms, &mut hw, &mut sink);
    }
}
