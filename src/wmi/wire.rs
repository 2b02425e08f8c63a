//! HP BIOS WMI wire structures.
//!
//! Request layout (144 bytes, every field little-endian):
//! ```text
//! ┌───────────┬───────────┬──────────────┬────────────┬──────────────┐
//! │ signature │ command   │ command_type │ datasize   │ data         │
//! │ u32       │ u32       │ u32          │ u32        │ [u8; 128]    │
//! └───────────┴───────────┴──────────────┴────────────┴──────────────┘
//! ```
//!
//! Response layout:
//! ```text
//! ┌───────────┬─────────────┬──────────────────────┐
//! │ sigpass   │ return_code │ payload (variable)   │
//! │ u32       │ u32         │                      │
//! └───────────┴─────────────┴──────────────────────┘
//! ```

use heapless::Vec;

/// GUID of the HP BIOS WMI management interface.
pub const HPWMI_BIOS_GUID: &str = "5FB7F034-2C63-45e9-BE91-3D44E2C707E4";

/// Magic carried in every request (`"SECU"` read as LE bytes).
pub const REQUEST_SIGNATURE: u32 = 0x5543_4553;

/// Capacity of the inline request payload.
pub const PAYLOAD_CAPACITY: usize = 128;

/// Size of the fixed request header before the payload slot.
const REQUEST_HEADER_SIZE: usize = 16;

/// Total encoded request size.
pub const REQUEST_SIZE: usize = REQUEST_HEADER_SIZE + PAYLOAD_CAPACITY;

/// Size of [`ResponseHeader`] on the wire.
pub const RESPONSE_HEADER_SIZE: usize = 8;

/// Operation kind carried in the `command` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Read,
    Write,
    Odm,
    /// Vendor-specific colour and light control.
    Color,
}

impl CommandKind {
    /// Numeric value on the wire.
    pub const fn raw(self) -> u32 {
        match self {
            Self::Read => 0x01,
            Self::Write => 0x02,
            Self::Odm => 0x03,
            Self::Color => 0x0002_0009,
        }
    }

    pub const fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x01 => Some(Self::Read),
            0x02 => Some(Self::Write),
            0x03 => Some(Self::Odm),
            0x0002_0009 => Some(Self::Color),
            _ => None,
        }
    }
}

/// A query as sent to the firmware.
///
/// The payload lives in a bounds-checked fixed-capacity vector, so a
/// request can never hold more than [`PAYLOAD_CAPACITY`] bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub signature: u32,
    /// Raw command value. Kept numeric so requests with unknown commands
    /// can be decoded and answered by a simulated firmware.
    pub command: u32,
    pub command_type: u32,
    payload: Vec<u8, PAYLOAD_CAPACITY>,
}

impl QueryRequest {
    /// Build a request carrying `payload`.
    ///
    /// Returns `None` if the payload does not fit the 128-byte slot.
    pub fn new(command: CommandKind, command_type: u32, payload: &[u8]) -> Option<Self> {
        let payload = Vec::from_slice(payload).ok()?;
        Some(Self {
            signature: REQUEST_SIGNATURE,
            command: command.raw(),
            command_type,
            payload,
        })
    }

    /// Bytes carried in the payload slot (`datasize` of them).
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn datasize(&self) -> u32 {
        self.payload.len() as u32
    }

    /// The command as a known [`CommandKind`], if it is one.
    pub fn command_kind(&self) -> Option<CommandKind> {
        CommandKind::from_raw(self.command)
    }

    /// Encode into the fixed 144-byte layout, zero-filling the unused slot.
    pub fn encode(&self) -> [u8; REQUEST_SIZE] {
        let mut out = [0u8; REQUEST_SIZE];
        out[0..4].copy_from_slice(&self.signature.to_le_bytes());
        out[4..8].copy_from_slice(&self.command.to_le_bytes());
        out[8..12].copy_from_slice(&self.command_type.to_le_bytes());
        out[12..16].copy_from_slice(&self.datasize().to_le_bytes());
        out[REQUEST_HEADER_SIZE..REQUEST_HEADER_SIZE + self.payload.len()]
            .copy_from_slice(&self.payload);
        out
    }

    /// Decode a request from its wire form.
    ///
    /// Fails with [`WireError::Truncated`] if `bytes` is shorter than the
    /// fixed layout and [`WireError::DatasizeOverflow`] if the `datasize`
    /// field claims more than the payload slot holds. The signature is
    /// not checked here; that is the receiver's decision.
    pub fn decode(bytes: &[u8]) -> Result<Self, WireError> {
        if bytes.len() < REQUEST_SIZE {
            return Err(WireError::Truncated {
                expected: REQUEST_SIZE,
                actual: bytes.len(),
            });
        }
        let datasize = read_u32(bytes, 12) as usize;
        if datasize > PAYLOAD_CAPACITY {
            return Err(WireError::DatasizeOverflow(datasize));
        }
        let data = &bytes[REQUEST_HEADER_SIZE..REQUEST_HEADER_SIZE + datasize];
        Ok(Self {
            signature: read_u32(bytes, 0),
            command: read_u32(bytes, 4),
            command_type: read_u32(bytes, 8),
            payload: Vec::from_slice(data).map_err(|()| WireError::DatasizeOverflow(datasize))?,
        })
    }
}

/// Leading fields of every response buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResponseHeader {
    /// Echo field; its contents carry no meaning for callers.
    pub sigpass: u32,
    pub return_code: u32,
}

impl ResponseHeader {
    /// Parse the header from the start of a response buffer.
    ///
    /// Bytes missing from a short buffer read as zero, so this never
    /// indexes past the end of `bytes`.
    pub fn parse(bytes: &[u8]) -> Self {
        let mut raw = [0u8; RESPONSE_HEADER_SIZE];
        let n = bytes.len().min(RESPONSE_HEADER_SIZE);
        raw[..n].copy_from_slice(&bytes[..n]);
        Self {
            sigpass: read_u32(&raw, 0),
            return_code: read_u32(&raw, 4),
        }
    }

    pub fn encode(&self) -> [u8; RESPONSE_HEADER_SIZE] {
        let mut out = [0u8; RESPONSE_HEADER_SIZE];
        out[0..4].copy_from_slice(&self.sigpass.to_le_bytes());
        out[4..8].copy_from_slice(&self.return_code.to_le_bytes());
        out
    }
}

/// Payload bytes of a response buffer, empty if the buffer is no longer
/// than the header.
pub fn response_payload(bytes: &[u8]) -> &[u8] {
    bytes.get(RESPONSE_HEADER_SIZE..).unwrap_or(&[])
}

/// Build a complete response buffer (header followed by `payload`).
pub fn encode_response(return_code: u32, payload: &[u8]) -> std::vec::Vec<u8> {
    let header = ResponseHeader {
        sigpass: 0,
        return_code,
    };
    let mut out = std::vec::Vec::with_capacity(RESPONSE_HEADER_SIZE + payload.len());
    out.extend_from_slice(&header.encode());
    out.extend_from_slice(payload);
    out
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    let mut word = [0u8; 4];
    word.copy_from_slice(&bytes[offset..offset + 4]);
    u32::from_le_bytes(word)
}

/// Errors from decoding wire structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// Fewer bytes than the fixed layout requires.
    Truncated { expected: usize, actual: usize },
    /// `datasize` exceeds the 128-byte payload slot.
    DatasizeOverflow(usize),
}

impl core::fmt::Display for WireError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Truncated { expected, actual } => {
                write!(f, "truncated: expected {} bytes, got {}", expected, actual)
            }
            Self::DatasizeOverflow(n) => {
                write!(f, "datasize {} exceeds {}-byte payload slot", n, PAYLOAD_CAPACITY)
            }
        }
    }
}
