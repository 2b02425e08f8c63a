//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the query engine or the
//! light service against mock ports. No firmware is required.

mod engine_tests;
mod light_service_tests;
mod mock_firmware;
