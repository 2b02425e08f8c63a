//! HP BIOS WMI light-bar control.
//!
//! Exposes the query engine, the light feature and the platform adapters.
//! The core (`wmi`, `app`) is pure logic behind port traits; everything that
//! touches `/proc` or `/sys` lives in `adapters`.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod wmi;

mod error;

pub use error::{Error, Result};
