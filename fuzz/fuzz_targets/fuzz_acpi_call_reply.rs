//! Fuzz target: `acpi_call::parse_reply`
//!
//! Arbitrary text read back from `/proc/acpi/call` must parse or fail with
//! a typed error, never panic.
//!
//! cargo fuzz run fuzz_acpi_call_reply

#![no_main]

use hpcolor::adapters::acpi_call::parse_reply;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let _ = parse_reply(&text);
});
