//! Adapter configuration
//!
//! Everything the host binary needs to reach the firmware and the light
//! setting it should apply. Defaults reproduce the stock behaviour: light
//! off, long animation, acpi_call transport.

use std::path::PathBuf;

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::app::light::{AnimationDuration, LightMode, LightRequest};
use crate::app::ports::ConfigError;
use crate::wmi::HPWMI_BIOS_GUID;

/// Which [`FirmwarePort`](crate::app::ports::FirmwarePort) implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Linux `acpi_call` module.
    AcpiCall,
    /// In-memory firmware, for dry runs.
    Simulated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    // --- Transport ---
    pub backend: Backend,
    /// Control file exposed by `acpi_call`.
    pub acpi_call_path: PathBuf,
    /// ACPI method implementing the WMI interface.
    pub acpi_method: String,
    /// WMI instance number.
    pub instance: u8,

    // --- Probe ---
    /// Directory listing bound WMI devices.
    pub wmi_devices_dir: PathBuf,
    pub wmi_guid: String,

    // --- Light ---
    pub light_mode: LightMode,
    pub animation_duration: AnimationDuration,

    // --- Logging ---
    /// One of error, warn, info, debug, trace.
    pub log_level: String,
    /// Optional log file in addition to stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            backend: Backend::AcpiCall,
            acpi_call_path: PathBuf::from("/proc/acpi/call"),
            acpi_method: String::from("\\_SB.WMID.WMAA"),
            instance: 0,

            wmi_devices_dir: PathBuf::from("/sys/bus/wmi/devices"),
            wmi_guid: String::from(HPWMI_BIOS_GUID),

            light_mode: LightMode::Off,
            animation_duration: AnimationDuration::Long,

            log_level: String::from("info"),
            log_file: None,
        }
    }
}

impl AdapterConfig {
    /// The light setting this configuration asks for.
    pub fn light_request(&self) -> LightRequest {
        LightRequest::new(self.light_mode, self.animation_duration)
    }

    pub fn level_filter(&self) -> Option<LevelFilter> {
        self.log_level.parse().ok()
    }

    /// Range-check every field. Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.acpi_method.starts_with('\\') || self.acpi_method.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationFailed(
                "acpi_method must be an absolute ACPI path without spaces",
            ));
        }
        if !is_guid(&self.wmi_guid) {
            return Err(ConfigError::ValidationFailed(
                "wmi_guid must be formatted as 8-4-4-4-12 hex digits",
            ));
        }
        if self.level_filter().is_none() {
            return Err(ConfigError::ValidationFailed("log_level is not a log level"));
        }
        Ok(())
    }
}

fn is_guid(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    let lens = [8, 4, 4, 4, 12];
    groups.len() == lens.len()
        && groups
            .iter()
            .zip(lens)
            .all(|(g, n)| g.len() == n && g.chars().all(|c| c.is_ascii_hexdigit()))
}
