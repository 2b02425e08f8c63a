//! Light-bar feature: mode and animation duration.
//!
//! The firmware takes a three-byte payload on command type 7 of the
//! colour command:
//!
//! | Byte | Meaning            |
//! |------|--------------------|
//! | 0    | reserved, always 0 |
//! | 1    | [`LightMode`]      |
//! | 2    | [`AnimationDuration`] |

use serde::{Deserialize, Serialize};

use crate::app::ports::FirmwarePort;
use crate::wmi::{CommandKind, QueryEngine, QueryError};

/// Command type selecting the light feature.
pub const LIGHT_FEATURE_SELECTOR: u32 = 7;

/// Size of the light payload, both directions.
pub const LIGHT_PAYLOAD_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum LightMode {
    On = 0,
    Breathing = 1,
    Blinking = 3,
    Off = 255,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AnimationDuration {
    Short = 2,
    Medium = 5,
    Long = 10,
}

impl LightMode {
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::On),
            1 => Some(Self::Breathing),
            3 => Some(Self::Blinking),
            255 => Some(Self::Off),
            _ => None,
        }
    }
}

impl AnimationDuration {
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            2 => Some(Self::Short),
            5 => Some(Self::Medium),
            10 => Some(Self::Long),
            _ => None,
        }
    }
}

/// A requested light setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightRequest {
    pub mode: LightMode,
    pub duration: AnimationDuration,
}

impl LightRequest {
    pub const fn new(mode: LightMode, duration: AnimationDuration) -> Self {
        Self { mode, duration }
    }

    pub const fn payload(&self) -> [u8; LIGHT_PAYLOAD_SIZE] {
        [0, self.mode as u8, self.duration as u8]
    }

    /// Parse a payload produced by [`payload`](Self::payload). The
    /// reserved byte is ignored.
    pub fn from_payload(payload: &[u8]) -> Option<Self> {
        match payload {
            [_, mode, duration, ..] => Some(Self {
                mode: LightMode::from_raw(*mode)?,
                duration: AnimationDuration::from_raw(*duration)?,
            }),
            _ => None,
        }
    }
}

impl Default for LightRequest {
    fn default() -> Self {
        Self::new(LightMode::Off, AnimationDuration::Long)
    }
}

/// Send `request` to the firmware.
///
/// Returns the buffer as the firmware left it; the light feature does
/// not define a meaning for it.
pub fn set_light<P: FirmwarePort>(
    engine: &mut QueryEngine<P>,
    request: LightRequest,
) -> Result<[u8; LIGHT_PAYLOAD_SIZE], QueryError> {
    let mut state = request.payload();
    engine.perform_query(
        LIGHT_FEATURE_SELECTOR,
        CommandKind::Color,
        &mut state,
        LIGHT_PAYLOAD_SIZE,
        LIGHT_PAYLOAD_SIZE,
    )?;
    Ok(state)
}
