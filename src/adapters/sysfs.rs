//! WMI capability probe backed by sysfs.
//!
//! The kernel's WMI bus lists one directory per interface under
//! `/sys/bus/wmi/devices`, named after the GUID. Interfaces that appear
//! more than once get a `-<n>` suffix.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::debug;

use crate::app::ports::{CapabilityPort, ProbeError};

pub struct SysfsWmiProbe {
    devices_dir: PathBuf,
}

impl SysfsWmiProbe {
    pub fn new(devices_dir: impl Into<PathBuf>) -> Self {
        Self {
            devices_dir: devices_dir.into(),
        }
    }
}

impl CapabilityPort for SysfsWmiProbe {
    fn has_interface(&self, guid: &str) -> Result<bool, ProbeError> {
        let entries = match fs::read_dir(&self.devices_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} missing, no WMI bus", self.devices_dir.display());
                return Ok(false);
            }
            Err(e) => return Err(e.into()),
        };

        for entry in entries {
            let name = entry?.file_name();
            if let Some(name) = name.to_str() {
                if device_matches(name, guid) {
                    debug!("found WMI device {}", name);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

/// `name` is `guid` or `guid-<digits>`, ignoring ASCII case.
fn device_matches(name: &str, guid: &str) -> bool {
    let Some(head) = name.get(..guid.len()) else {
        return false;
    };
    if !head.eq_ignore_ascii_case(guid) {
        return false;
    }
    match &name[guid.len()..] {
        "" => true,
        suffix => suffix
            .strip_prefix('-')
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())),
    }
}
