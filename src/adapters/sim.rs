//! In-memory firmware simulation.
//!
//! Decodes requests the way the BIOS does and answers the light feature
//! from an in-memory state. Used by the `simulated` backend for dry runs
//! on machines without the WMI interface.

use log::debug;

use crate::app::light::{LIGHT_FEATURE_SELECTOR, LightRequest};
use crate::app::ports::{AcpiObject, CapabilityPort, FirmwarePort, ProbeError, TransportError};
use crate::wmi::method::MethodVariant;
use crate::wmi::return_code::ReturnCode;
use crate::wmi::wire::{
    CommandKind, HPWMI_BIOS_GUID, QueryRequest, REQUEST_SIGNATURE, REQUEST_SIZE, encode_response,
};

pub struct SimulatedFirmware {
    light: LightRequest,
    supports_light: bool,
    invocations: usize,
}

impl SimulatedFirmware {
    pub fn new() -> Self {
        Self {
            light: LightRequest::default(),
            supports_light: true,
            invocations: 0,
        }
    }

    /// A firmware that answers the light selector with "unknown command type".
    pub fn without_light() -> Self {
        Self {
            supports_light: false,
            ..Self::new()
        }
    }

    /// Current light state.
    pub fn light(&self) -> LightRequest {
        self.light
    }

    pub fn invocations(&self) -> usize {
        self.invocations
    }

    fn handle(&mut self, request: &QueryRequest) -> (u32, Vec<u8>) {
        if request.signature != REQUEST_SIGNATURE {
            return (ReturnCode::WrongSignature.raw(), Vec::new());
        }
        let Some(command) = request.command_kind() else {
            return (ReturnCode::UnknownCommand.raw(), Vec::new());
        };

        match (command, request.command_type) {
            (CommandKind::Color, LIGHT_FEATURE_SELECTOR) if self.supports_light => {
                match LightRequest::from_payload(request.payload()) {
                    Some(light) => {
                        self.light = light;
                        (0, light.payload().to_vec())
                    }
                    None => (ReturnCode::InputDataInvalid.raw(), Vec::new()),
                }
            }
            _ => (ReturnCode::UnknownCmdType.raw(), Vec::new()),
        }
    }
}

impl Default for SimulatedFirmware {
    fn default() -> Self {
        Self::new()
    }
}

impl FirmwarePort for SimulatedFirmware {
    type Object = AcpiObject;

    fn invoke(
        &mut self,
        guid: &str,
        _instance: u8,
        method: MethodVariant,
        request: &[u8; REQUEST_SIZE],
    ) -> Result<Option<AcpiObject>, TransportError> {
        self.invocations += 1;
        if !guid.eq_ignore_ascii_case(HPWMI_BIOS_GUID) {
            return Ok(None);
        }

        let (code, mut payload) = match QueryRequest::decode(request) {
            Ok(req) => self.handle(&req),
            Err(e) => {
                debug!("sim: undecodable request: {}", e);
                (ReturnCode::InputDataInvalid.raw(), Vec::new())
            }
        };
        payload.truncate(method.capacity());
        debug!("sim: method {} -> code {:#x}", method.id(), code);
        Ok(Some(AcpiObject::Buffer(encode_response(code, &payload))))
    }
}

impl CapabilityPort for SimulatedFirmware {
    fn has_interface(&self, guid: &str) -> Result<bool, ProbeError> {
        Ok(guid.eq_ignore_ascii_case(HPWMI_BIOS_GUID))
    }
}
