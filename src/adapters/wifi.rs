//! WiFi soft-AP adapter.
//!
//! The prop is the network: it raises an access point the handset joins,
//! and the TCP command channel listens on top.  There is no station mode
//! and no internet — the AP exists purely to carry the single-peer link.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via
//!   `esp_idf_svc::wifi::EspWifi`.
//! - **all other targets**: simulation stub for host-side tests.
//!
//! A start failure is reported once by the boot path and the system
//! continues with local controls only.

use core::fmt;
use log::info;

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityError {
    InvalidSsid,
    InvalidPassword,
    StartFailed,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::StartFailed => write!(f, "soft-AP start failed"),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() || ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(()); // open network
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

// ───────────────────────────────────────────────────────────────
// Soft-AP adapter
// ───────────────────────────────────────────────────────────────

#[cfg_attr(not(target_os = "espidf"), derive(Debug))]
pub struct WifiApAdapter {
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    running: bool,
    #[cfg(target_os = "espidf")]
    driver: Option<esp_idf_svc::wifi::EspWifi<'static>>,
}

impl WifiApAdapter {
    /// Validates credentials up front so a bad config fails at boot, not
    /// mid-game.
    pub fn new(ssid: &str, password: &str) -> Result<Self, ConnectivityError> {
        validate_ssid(ssid)?;
        validate_password(password)?;
        let mut s = heapless::String::new();
        s.push_str(ssid).map_err(|_| ConnectivityError::InvalidSsid)?;
        let mut p = heapless::String::new();
        p.push_str(password)
            .map_err(|_| ConnectivityError::InvalidPassword)?;
        Ok(Self {
            ssid: s,
            password: p,
            running: false,
            #[cfg(target_os = "espidf")]
            driver: None,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    #[cfg(target_os = "espidf")]
    pub fn start(&mut self) -> Result<(), ConnectivityError> {
        use esp_idf_hal::peripherals::Peripherals;
        use esp_idf_svc::eventloop::EspSystemEventLoop;
        use esp_idf_svc::nvs::EspDefaultNvsPartition;
        use esp_idf_svc::wifi::{AccessPointConfiguration, AuthMethod, Configuration, EspWifi};

        let peripherals = Peripherals::take().map_err(|_| ConnectivityError::StartFailed)?;
        let sysloop = EspSystemEventLoop::take().map_err(|_| ConnectivityError::StartFailed)?;
        // The WiFi stack wants an NVS partition for PHY calibration data;
        // losing it costs a slower start, nothing else.
        let nvs = EspDefaultNvsPartition::take().ok();

        let mut wifi = EspWifi::new(peripherals.modem, sysloop, nvs)
            .map_err(|_| ConnectivityError::StartFailed)?;

        let ap = AccessPointConfiguration {
            ssid: self.ssid.as_str().try_into().map_err(|_| ConnectivityError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidPassword)?,
            auth_method: if self.password.is_empty() {
                AuthMethod::None
            } else {
                AuthMethod::WPA2Personal
            },
            channel: 6,
            max_connections: 1, // single peer by design
            ..Default::default()
        };
        wifi.set_configuration(&Configuration::AccessPoint(ap))
            .map_err(|_| ConnectivityError::StartFailed)?;
        wifi.start().map_err(|_| ConnectivityError::StartFailed)?;

        self.driver = Some(wifi);
        self.running = true;
        info!("WiFi: soft-AP '{}' up (channel 6)", self.ssid);
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn start(&mut self) -> Result<(), ConnectivityError> {
        self.running = true;
        info!("WiFi(sim): soft-AP '{}' up", self.ssid);
        Ok(())
    }
}
