//! Unified error type for the adapter lifecycle.
//!
//! Query failures are reported per call as
//! [`LightOutcome`](crate::app::service::LightOutcome) and configuration
//! errors stay [`ConfigError`](crate::app::ports::ConfigError); only
//! attaching to the firmware can fail here.

use core::fmt;

use crate::app::ports::ProbeError;

#[derive(Debug)]
pub enum Error {
    /// The capability probe could not run.
    Probe(ProbeError),
    /// The firmware does not expose the expected WMI interface.
    NotCapable(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Probe(e) => write!(f, "probe: {e}"),
            Self::NotCapable(guid) => write!(f, "BIOS not capable: WMI interface {guid} not present"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Probe(e) => Some(e),
            Self::NotCapable(_) => None,
        }
    }
}

impl From<ProbeError> for Error {
    fn from(e: ProbeError) -> Self {
        Self::Probe(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
