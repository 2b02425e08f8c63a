//! Scripted firmware port for integration tests.
//!
//! Replays a fixed reply for every call, records what the engine sent,
//! and counts how many response objects were released.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use hpcolor::app::ports::{
    CapabilityPort, FirmwareObject, FirmwarePort, ObjectType, ProbeError, TransportError,
};
use hpcolor::wmi::MethodVariant;
use hpcolor::wmi::wire::{QueryRequest, REQUEST_SIZE, encode_response};

// ── Reply script ──────────────────────────────────────────────

#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Reply {
    /// A buffer object with these raw bytes (header included).
    Raw(Vec<u8>),
    /// An object of a non-buffer type.
    Shape(ObjectType),
    /// No object at all.
    Absent,
    Fail(TransportError),
}

impl Reply {
    pub fn ok(payload: &[u8]) -> Self {
        Self::Raw(encode_response(0, payload))
    }

    pub fn code(return_code: u32) -> Self {
        Self::Raw(encode_response(return_code, &[]))
    }
}

// ── Response object ───────────────────────────────────────────

pub struct MockObject {
    kind: ObjectType,
    bytes: Vec<u8>,
    drops: Arc<AtomicUsize>,
}

impl FirmwareObject for MockObject {
    fn object_type(&self) -> ObjectType {
        self.kind
    }

    fn buffer(&self) -> Option<&[u8]> {
        match self.kind {
            ObjectType::Buffer => Some(&self.bytes),
            _ => None,
        }
    }
}

impl Drop for MockObject {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

// ── ScriptedFirmware ──────────────────────────────────────────

pub struct ScriptedFirmware {
    pub reply: Reply,
    pub requests: Vec<QueryRequest>,
    pub methods: Vec<MethodVariant>,
    pub objects_created: usize,
    drops: Arc<AtomicUsize>,
    present: bool,
}

#[allow(dead_code)]
impl ScriptedFirmware {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Vec::new(),
            methods: Vec::new(),
            objects_created: 0,
            drops: Arc::new(AtomicUsize::new(0)),
            present: true,
        }
    }

    /// Probe result reported through [`CapabilityPort`].
    pub fn absent_interface(mut self) -> Self {
        self.present = false;
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.len()
    }

    pub fn objects_released(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }
}

impl FirmwarePort for ScriptedFirmware {
    type Object = MockObject;

    fn invoke(
        &mut self,
        _guid: &str,
        _instance: u8,
        method: MethodVariant,
        request: &[u8; REQUEST_SIZE],
    ) -> Result<Option<MockObject>, TransportError> {
        self.requests
            .push(QueryRequest::decode(request).expect("engine sent an undecodable request"));
        self.methods.push(method);

        let (kind, bytes) = match &self.reply {
            Reply::Raw(bytes) => (ObjectType::Buffer, bytes.clone()),
            Reply::Shape(kind) => (*kind, vec![0xEE; 16]),
            Reply::Absent => return Ok(None),
            Reply::Fail(e) => return Err(e.clone()),
        };
        self.objects_created += 1;
        Ok(Some(MockObject {
            kind,
            bytes,
            drops: Arc::clone(&self.drops),
        }))
    }
}

impl CapabilityPort for ScriptedFirmware {
    fn has_interface(&self, _guid: &str) -> Result<bool, ProbeError> {
        Ok(self.present)
    }
}
