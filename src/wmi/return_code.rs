//! Firmware return codes.

use core::fmt;

/// Nonzero `return_code` reported in a response header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnCode {
    WrongSignature,
    UnknownCommand,
    /// The firmware does not implement the requested command type. Seen
    /// routinely on models without the feature.
    UnknownCmdType,
    InputSizeNull,
    InputDataNull,
    InputDataInvalid,
    ReturnSizeNull,
    ReturnSizeInvalid,
    Other(u32),
}

impl ReturnCode {
    /// Classify a raw code. Zero means success and has no `ReturnCode`.
    pub const fn from_raw(raw: u32) -> Option<Self> {
        let code = match raw {
            0 => return None,
            0x02 => Self::WrongSignature,
            0x03 => Self::UnknownCommand,
            0x04 => Self::UnknownCmdType,
            0x05 => Self::InputSizeNull,
            0x06 => Self::InputDataNull,
            0x07 => Self::InputDataInvalid,
            0x08 => Self::ReturnSizeNull,
            0x09 => Self::ReturnSizeInvalid,
            other => Self::Other(other),
        };
        Some(code)
    }

    pub const fn raw(self) -> u32 {
        match self {
            Self::WrongSignature => 0x02,
            Self::UnknownCommand => 0x03,
            Self::UnknownCmdType => 0x04,
            Self::InputSizeNull => 0x05,
            Self::InputDataNull => 0x06,
            Self::InputDataInvalid => 0x07,
            Self::ReturnSizeNull => 0x08,
            Self::ReturnSizeInvalid => 0x09,
            Self::Other(raw) => raw,
        }
    }

    /// True for the "feature not supported" signal.
    pub const fn is_unsupported(self) -> bool {
        matches!(self, Self::UnknownCmdType)
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongSignature => write!(f, "wrong signature"),
            Self::UnknownCommand => write!(f, "unknown command"),
            Self::UnknownCmdType => write!(f, "unknown command type"),
            Self::InputSizeNull => write!(f, "input size null"),
            Self::InputDataNull => write!(f, "input data null"),
            Self::InputDataInvalid => write!(f, "input data invalid"),
            Self::ReturnSizeNull => write!(f, "return size null"),
            Self::ReturnSizeInvalid => write!(f, "return size invalid"),
            Self::Other(raw) => write!(f, "code {:#x}", raw),
        }
    }
}
