//! Port traits — the hexagonal boundary between the query core and the platform.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ QueryEngine / LightService (domain)
//! ```
//!
//! Transports (acpi_call, simulation), capability probes and configuration
//! storage implement these traits. The [`QueryEngine`](crate::wmi::QueryEngine)
//! and [`LightService`](super::service::LightService) consume them via
//! generics, so the core never touches `/proc` or `/sys` directly.

use crate::config::AdapterConfig;
use crate::wmi::method::MethodVariant;
use crate::wmi::wire::REQUEST_SIZE;

// ───────────────────────────────────────────────────────────────
// Firmware port (driven adapter: domain → firmware)
// ───────────────────────────────────────────────────────────────

/// Type tag of a firmware response object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Integer,
    String,
    Buffer,
    Package,
}

/// A response object handed back by the firmware call.
///
/// The engine owns the object for the duration of one query and drops it
/// on every exit path. Adapters that hold platform resources release them
/// in `Drop`.
pub trait FirmwareObject {
    fn object_type(&self) -> ObjectType;

    /// Raw bytes when the object is a buffer, `None` otherwise.
    fn buffer(&self) -> Option<&[u8]>;
}

/// The firmware-call primitive: one blocking method evaluation.
///
/// Timeouts and retries, if any, belong to the implementation. Callers
/// must not invoke the same firmware interface concurrently; the `&mut self`
/// receiver enforces this for a single port value.
pub trait FirmwarePort {
    type Object: FirmwareObject;

    /// Evaluate method `method` of instance `instance` of the WMI interface
    /// `guid` with the encoded request as its input buffer.
    ///
    /// `Ok(None)` means the call completed without producing an object.
    fn invoke(
        &mut self,
        guid: &str,
        instance: u8,
        method: MethodVariant,
        request: &[u8; REQUEST_SIZE],
    ) -> Result<Option<Self::Object>, TransportError>;
}

impl<P: FirmwarePort + ?Sized> FirmwarePort for &mut P {
    type Object = P::Object;

    fn invoke(
        &mut self,
        guid: &str,
        instance: u8,
        method: MethodVariant,
        request: &[u8; REQUEST_SIZE],
    ) -> Result<Option<Self::Object>, TransportError> {
        (**self).invoke(guid, instance, method, request)
    }
}

/// Owned ACPI object, as produced by transports that copy the result out
/// of the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcpiObject {
    Integer(u64),
    String(String),
    Buffer(Vec<u8>),
    Package(Vec<AcpiObject>),
}

impl FirmwareObject for AcpiObject {
    fn object_type(&self) -> ObjectType {
        match self {
            Self::Integer(_) => ObjectType::Integer,
            Self::String(_) => ObjectType::String,
            Self::Buffer(_) => ObjectType::Buffer,
            Self::Package(_) => ObjectType::Package,
        }
    }

    fn buffer(&self) -> Option<&[u8]> {
        match self {
            Self::Buffer(bytes) => Some(bytes),
            _ => None,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Capability port (driven adapter: domain → platform inventory)
// ───────────────────────────────────────────────────────────────

/// Reports whether the firmware exposes a given WMI interface.
pub trait CapabilityPort {
    fn has_interface(&self, guid: &str) -> Result<bool, ProbeError>;
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists adapter configuration.
///
/// Implementations MUST validate before persisting. Invalid values are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Load configuration. Returns [`AdapterConfig::default()`] if no
    /// stored config exists.
    fn load(&self) -> Result<AdapterConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &AdapterConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`FirmwarePort::invoke`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Reading or writing the transport failed.
    Io(std::io::ErrorKind),
    /// The platform reported a failure status (e.g. `AE_NOT_FOUND`).
    Status(String),
    /// The transport produced output that could not be parsed.
    Malformed(&'static str),
}

/// Errors from [`CapabilityPort::has_interface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// The device inventory could not be read.
    Io(std::io::ErrorKind),
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// Stored config failed deserialization.
    Corrupted(String),
    /// A config field failed validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError(std::io::ErrorKind),
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io(kind) => write!(f, "I/O error: {}", kind),
            Self::Status(status) => write!(f, "firmware status {}", status),
            Self::Malformed(what) => write!(f, "malformed reply: {}", what),
        }
    }
}

impl core::fmt::Display for ProbeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io(kind) => write!(f, "I/O error: {}", kind),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted(msg) => write!(f, "config corrupted: {}", msg),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError(kind) => write!(f, "I/O error: {}", kind),
        }
    }
}

impl std::error::Error for TransportError {}
impl std::error::Error for ProbeError {}
impl std::error::Error for ConfigError {}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.kind())
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.kind())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e.kind())
    }
}
