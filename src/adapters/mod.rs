//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements                    | Connects to               |
//! |---------------|-------------------------------|---------------------------|
//! | `acpi_call`   | FirmwarePort                  | `/proc/acpi/call`         |
//! | `sim`         | FirmwarePort, CapabilityPort  | In-memory BIOS model      |
//! | `sysfs`       | CapabilityPort                | `/sys/bus/wmi/devices`    |
//! | `config_file` | ConfigPort                    | JSON file                 |
//! | `logging`     | —                             | fern → stderr / log file  |

pub mod acpi_call;
pub mod config_file;
pub mod logging;
pub mod sim;
pub mod sysfs;
