//! Fuzz target: `QueryEngine::perform_query` decode path
//!
//! The first two bytes pick `insize`/`outsize`; the rest is returned by the
//! firmware as the response buffer. The engine must never panic, never
//! write past `outsize`, and leave the buffer untouched on error.
//!
//! cargo fuzz run fuzz_response_decode

#![no_main]

use hpcolor::app::ports::{AcpiObject, FirmwarePort, TransportError};
use hpcolor::wmi::wire::REQUEST_SIZE;
use hpcolor::wmi::{CommandKind, MethodVariant, QueryEngine};
use libfuzzer_sys::fuzz_target;

struct Replay(Vec<u8>);

impl FirmwarePort for Replay {
    type Object = AcpiObject;

    fn invoke(
        &mut self,
        _guid: &str,
        _instance: u8,
        _method: MethodVariant,
        _request: &[u8; REQUEST_SIZE],
    ) -> Result<Option<AcpiObject>, TransportError> {
        Ok(Some(AcpiObject::Buffer(self.0.clone())))
    }
}

fuzz_target!(|data: &[u8]| {
    let [insize, outsize, reply @ ..] = data else {
        return;
    };
    let (insize, outsize) = (*insize as usize, *outsize as usize);

    let mut engine = QueryEngine::new(Replay(reply.to_vec()));
    let mut io = [0xA5u8; 256];
    let result = engine.perform_query(7, CommandKind::Color, &mut io, insize, outsize);

    assert!(io[outsize..].iter().all(|&b| b == 0xA5), "wrote past outsize");
    if result.is_err() {
        assert!(io.iter().all(|&b| b == 0xA5), "buffer modified on error");
    }
});
