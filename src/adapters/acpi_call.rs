//! `acpi_call` transport adapter.
//!
//! Implements [`FirmwarePort`] on top of the Linux `acpi_call` module. A
//! method evaluation is one write of the call line to `/proc/acpi/call`
//! followed by one read of the textual result:
//!
//! ```text
//!  write  \_SB.WMID.WMAA 0x0 0x2 b53454355090002000700...
//!  read   {0x53, 0x45, 0x43, 0x55, 0x00, 0x00, 0x00, 0x00, ...}
//! ```
//!
//! Replies are `0x..` integers, `"..."` strings, `{..}` buffers, `[..]`
//! packages, `not called`, or `Error: AE_...`.

use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::app::ports::{AcpiObject, FirmwarePort, TransportError};
use crate::wmi::method::MethodVariant;
use crate::wmi::wire::REQUEST_SIZE;

/// Largest reply `acpi_call` produces.
const MAX_REPLY: usize = 4096 * 6 + 64;

/// Packages nested deeper than this are rejected.
const MAX_DEPTH: usize = 8;

pub struct AcpiCallPort {
    path: PathBuf,
    method: String,
}

impl AcpiCallPort {
    /// `method` is the ACPI path of the WMI wrapper, e.g. `\_SB.WMID.WMAA`.
    pub fn new(path: impl Into<PathBuf>, method: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FirmwarePort for AcpiCallPort {
    type Object = AcpiObject;

    fn invoke(
        &mut self,
        guid: &str,
        instance: u8,
        method: MethodVariant,
        request: &[u8; REQUEST_SIZE],
    ) -> Result<Option<AcpiObject>, TransportError> {
        let line = format_call(&self.method, instance, method, request);
        debug!("acpi_call {} for {}: {}", self.path.display(), guid, line);

        // The result is read back through a fresh handle; the write
        // advances the offset of the first one.
        OpenOptions::new()
            .write(true)
            .open(&self.path)?
            .write_all(line.as_bytes())?;

        let mut raw = Vec::with_capacity(256);
        File::open(&self.path)?
            .take(MAX_REPLY as u64)
            .read_to_end(&mut raw)?;
        let reply = String::from_utf8_lossy(&raw);
        parse_reply(&reply)
    }
}

/// Build the call line written to the control file.
pub fn format_call(
    acpi_method: &str,
    instance: u8,
    method: MethodVariant,
    request: &[u8],
) -> String {
    let mut line = format!("{} {:#x} {:#x} b", acpi_method, instance, method.id());
    for byte in request {
        // Writing into a String cannot fail.
        let _ = write!(line, "{:02x}", byte);
    }
    line
}

/// Parse the text read back from the control file.
///
/// `Ok(None)` means no call result is available.
pub fn parse_reply(reply: &str) -> Result<Option<AcpiObject>, TransportError> {
    let reply = reply.trim_matches(|c: char| c == '\0' || c.is_whitespace());
    if reply.is_empty() || reply == "not called" {
        return Ok(None);
    }
    if let Some(status) = reply.strip_prefix("Error:") {
        return Err(TransportError::Status(status.trim().to_owned()));
    }

    let mut parser = Parser { rest: reply };
    let value = parser.value(0)?;
    parser.skip_ws();
    if !parser.rest.is_empty() {
        return Err(TransportError::Malformed("trailing data after value"));
    }
    Ok(Some(value))
}

struct Parser<'a> {
    rest: &'a str,
}

impl Parser<'_> {
    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn value(&mut self, depth: usize) -> Result<AcpiObject, TransportError> {
        self.skip_ws();
        match self.rest.chars().next() {
            Some('{') => self.buffer(),
            Some('[') => self.package(depth),
            Some('"') => self.string(),
            Some(c) if c.is_ascii_digit() => self.integer().map(AcpiObject::Integer),
            _ => Err(TransportError::Malformed("unexpected token")),
        }
    }

    fn integer(&mut self) -> Result<u64, TransportError> {
        self.skip_ws();
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(self.rest.len());
        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        let parsed = match token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => token.parse(),
        };
        parsed.map_err(|_| TransportError::Malformed("bad integer"))
    }

    fn buffer(&mut self) -> Result<AcpiObject, TransportError> {
        self.eat('{');
        let mut bytes = Vec::new();
        if self.eat('}') {
            return Ok(AcpiObject::Buffer(bytes));
        }
        loop {
            let byte = u8::try_from(self.integer()?)
                .map_err(|_| TransportError::Malformed("buffer element exceeds a byte"))?;
            bytes.push(byte);
            if self.eat(',') {
                continue;
            }
            if self.eat('}') {
                return Ok(AcpiObject::Buffer(bytes));
            }
            return Err(TransportError::Malformed("unterminated buffer"));
        }
    }

    fn package(&mut self, depth: usize) -> Result<AcpiObject, TransportError> {
        if depth >= MAX_DEPTH {
            return Err(TransportError::Malformed("package nested too deep"));
        }
        self.eat('[');
        let mut items = Vec::new();
        if self.eat(']') {
            return Ok(AcpiObject::Package(items));
        }
        loop {
            items.push(self.value(depth + 1)?);
            if self.eat(',') {
                continue;
            }
            if self.eat(']') {
                return Ok(AcpiObject::Package(items));
            }
            return Err(TransportError::Malformed("unterminated package"));
        }
    }

    fn string(&mut self) -> Result<AcpiObject, TransportError> {
        self.eat('"');
        let end = self
            .rest
            .find('"')
            .ok_or(TransportError::Malformed("unterminated string"))?;
        let s = self.rest[..end].to_owned();
        self.rest = &self.rest[end + 1..];
        Ok(AcpiObject::String(s))
    }
}
