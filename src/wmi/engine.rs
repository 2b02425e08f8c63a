//! Query engine: request marshalling, firmware invocation, reply decoding.
//!
//! One call to [`QueryEngine::perform_query`] runs the whole pipeline:
//!
//! ```text
//!  io_buffer[..insize] ──▶ QueryRequest ──▶ select_method(outsize)
//!                                               │
//!                                               ▼
//!  io_buffer[..outsize] ◀── decode ◀── FirmwarePort::invoke
//! ```
//!
//! Every early exit is an explicit [`QueryError`]. The response object is
//! a local owned value, so it is dropped exactly once whichever branch
//! returns.

use core::fmt;

use log::{debug, warn};

use crate::app::ports::{FirmwareObject, FirmwarePort, ObjectType, TransportError};

use super::method::{MethodVariant, select_method};
use super::return_code::ReturnCode;
use super::wire::{
    CommandKind, HPWMI_BIOS_GUID, PAYLOAD_CAPACITY, QueryRequest, ResponseHeader,
    response_payload,
};

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

/// Caller misuse detected before any firmware call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// `insize` exceeds the 128-byte request payload slot.
    InputTooLarge(usize),
    /// `outsize` exceeds the largest method variant.
    OutputTooLarge(usize),
    /// `io_buffer` cannot hold `insize` or `outsize` bytes.
    BufferTooShort { required: usize, actual: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputTooLarge(n) => {
                write!(f, "input size {} exceeds {} bytes", n, PAYLOAD_CAPACITY)
            }
            Self::OutputTooLarge(n) => write!(f, "output size {} too large", n),
            Self::BufferTooShort { required, actual } => {
                write!(f, "buffer holds {} bytes, {} required", actual, required)
            }
        }
    }
}

/// Outcome of a failed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    Validation(ValidationError),
    /// The firmware call could not be carried out.
    Transport(TransportError),
    /// The firmware call returned no object.
    NoResponse,
    /// The firmware returned something other than a buffer.
    UnexpectedResponseShape(ObjectType),
    /// The firmware understood the request and refused it.
    FirmwareRejected(ReturnCode),
}

impl QueryError {
    /// Raw firmware return code, for errors that carry one.
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::FirmwareRejected(code) => Some(code.raw()),
            _ => None,
        }
    }

    /// True when the firmware signalled that the feature does not exist.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::FirmwareRejected(code) if code.is_unsupported())
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(e) => write!(f, "invalid query: {e}"),
            Self::Transport(e) => write!(f, "transport: {e}"),
            Self::NoResponse => write!(f, "firmware returned no object"),
            Self::UnexpectedResponseShape(t) => {
                write!(f, "expected buffer response, got {:?}", t)
            }
            Self::FirmwareRejected(code) => write!(f, "firmware rejected query: {code}"),
        }
    }
}

impl std::error::Error for QueryError {}

impl From<ValidationError> for QueryError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<TransportError> for QueryError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

// ───────────────────────────────────────────────────────────────
// QueryEngine
// ───────────────────────────────────────────────────────────────

/// Issues queries against one WMI interface instance through a
/// [`FirmwarePort`].
///
/// The engine keeps no state between calls besides its port and target.
/// Wrap it in a `Mutex` to share it between threads.
pub struct QueryEngine<P> {
    port: P,
    guid: String,
    instance: u8,
}

impl<P: FirmwarePort> QueryEngine<P> {
    /// Engine targeting instance 0 of the HP BIOS WMI interface.
    pub fn new(port: P) -> Self {
        Self::with_target(port, HPWMI_BIOS_GUID, 0)
    }

    pub fn with_target(port: P, guid: &str, instance: u8) -> Self {
        Self {
            port,
            guid: guid.to_owned(),
            instance,
        }
    }

    pub fn guid(&self) -> &str {
        &self.guid
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn into_port(self) -> P {
        self.port
    }

    /// Send `io_buffer[..insize]` as a `command`/`command_type` query and
    /// decode up to `outsize` response bytes back into `io_buffer`.
    ///
    /// On success `io_buffer[..outsize]` holds the response payload,
    /// zero-padded if the firmware returned fewer bytes. On error
    /// `io_buffer` is left as it was.
    pub fn perform_query(
        &mut self,
        command_type: u32,
        command: CommandKind,
        io_buffer: &mut [u8],
        insize: usize,
        outsize: usize,
    ) -> Result<(), QueryError> {
        if insize > PAYLOAD_CAPACITY {
            return Err(ValidationError::InputTooLarge(insize).into());
        }
        let method = select_method(outsize)?;
        let required = insize.max(outsize);
        if io_buffer.len() < required {
            return Err(ValidationError::BufferTooShort {
                required,
                actual: io_buffer.len(),
            }
            .into());
        }

        let request = QueryRequest::new(command, command_type, &io_buffer[..insize])
            .ok_or(ValidationError::InputTooLarge(insize))?;

        debug!(
            "query {:#x} command={:?} insize={} outsize={} method={}",
            command_type,
            command,
            insize,
            outsize,
            method.id()
        );

        let response = self.invoke(method, &request)?;
        decode_response(&response, command_type, &mut io_buffer[..outsize])
    }

    fn invoke(
        &mut self,
        method: MethodVariant,
        request: &QueryRequest,
    ) -> Result<P::Object, QueryError> {
        self.port
            .invoke(&self.guid, self.instance, method, &request.encode())?
            .ok_or(QueryError::NoResponse)
    }
}

/// Validate a response object and copy its payload into `out`.
///
/// `out` is exactly the caller's requested output window.
fn decode_response<O: FirmwareObject>(
    response: &O,
    command_type: u32,
    out: &mut [u8],
) -> Result<(), QueryError> {
    let kind = response.object_type();
    let bytes = match (kind, response.buffer()) {
        (ObjectType::Buffer, Some(bytes)) => bytes,
        _ => return Err(QueryError::UnexpectedResponseShape(kind)),
    };

    let header = ResponseHeader::parse(bytes);
    if let Some(code) = ReturnCode::from_raw(header.return_code) {
        if code.is_unsupported() {
            debug!("query {:#x} not supported by firmware", command_type);
        } else {
            warn!(
                "query {:#x} returned error {:#x} ({})",
                command_type,
                code.raw(),
                code
            );
        }
        return Err(QueryError::FirmwareRejected(code));
    }

    if out.is_empty() {
        return Ok(());
    }

    let payload = response_payload(bytes);
    let actual = out.len().min(payload.len());
    out[..actual].copy_from_slice(&payload[..actual]);
    out[actual..].fill(0);
    Ok(())
}
