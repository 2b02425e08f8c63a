//! Application core — light feature and lifecycle, zero I/O.
//!
//! All interaction with the platform happens through **port traits**
//! defined in [`ports`], keeping this layer testable without firmware.

pub mod light;
pub mod ports;
pub mod service;
