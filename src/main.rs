//! hpcolor — apply the configured light-bar setting through HP BIOS WMI.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │  JsonConfigFile   SysfsWmiProbe   AcpiCallPort / Sim     │
//! │  (ConfigPort)     (Capability)    (FirmwarePort)         │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │        LightService ──▶ QueryEngine (pure logic)         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `hpcolor [CONFIG]` (default `/etc/hpcolor.json`).

use anyhow::{Context, Result, anyhow};
use log::{error, info};

use hpcolor::adapters::acpi_call::AcpiCallPort;
use hpcolor::adapters::config_file::JsonConfigFile;
use hpcolor::adapters::logging;
use hpcolor::adapters::sim::SimulatedFirmware;
use hpcolor::adapters::sysfs::SysfsWmiProbe;
use hpcolor::app::ports::{CapabilityPort, ConfigPort, FirmwarePort};
use hpcolor::app::service::{LightOutcome, LightService};
use hpcolor::config::{AdapterConfig, Backend};
use hpcolor::wmi::QueryEngine;

const DEFAULT_CONFIG: &str = "/etc/hpcolor.json";

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_owned());
    let config = JsonConfigFile::new(&config_path)
        .load()
        .with_context(|| format!("loading {config_path}"))?;

    let level = config
        .level_filter()
        .ok_or_else(|| anyhow!("invalid log level {}", config.log_level))?;
    logging::init(level, config.log_file.as_deref()).context("setting up logging")?;

    info!("hpcolor v{}", env!("CARGO_PKG_VERSION"));

    match config.backend {
        Backend::AcpiCall => {
            let probe = SysfsWmiProbe::new(&config.wmi_devices_dir);
            let port = AcpiCallPort::new(&config.acpi_call_path, &config.acpi_method);
            run(&config, &probe, port)
        }
        Backend::Simulated => {
            let probe = SimulatedFirmware::new();
            run(&config, &probe, SimulatedFirmware::new())
        }
    }
}

fn run<P: FirmwarePort>(
    config: &AdapterConfig,
    probe: &impl CapabilityPort,
    port: P,
) -> Result<()> {
    let engine = QueryEngine::with_target(port, &config.wmi_guid, config.instance);
    let mut service = match LightService::attach(probe, engine) {
        Ok(service) => service,
        Err(e) => {
            error!("{}", e);
            return Err(e.into());
        }
    };

    // A failed query leaves the light unchanged but is not fatal.
    let outcome = service.apply(config.light_request());
    if let LightOutcome::Failed(e) = &outcome {
        error!("query failed: {}", e);
    }

    service.detach();
    Ok(())
}
