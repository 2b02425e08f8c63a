//! Output-size to WMI method id mapping.
//!
//! The firmware exposes one dispatch entry per response-buffer size class.
//! The smallest class that can hold the expected response is used.

use super::engine::ValidationError;

/// Largest response the firmware dispatch can return.
pub const MAX_OUTPUT_SIZE: usize = 4096;

/// Method id passed to the firmware alongside the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum MethodVariant {
    /// No output data.
    NoOutput = 1,
    /// Up to 4 bytes.
    Dword = 2,
    /// Up to 128 bytes.
    Small = 3,
    /// Up to 1 KiB.
    Medium = 4,
    /// Up to 4 KiB.
    Large = 5,
}

impl MethodVariant {
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Largest output the variant carries.
    pub const fn capacity(self) -> usize {
        match self {
            Self::NoOutput => 0,
            Self::Dword => 4,
            Self::Small => 128,
            Self::Medium => 1024,
            Self::Large => MAX_OUTPUT_SIZE,
        }
    }
}

/// Pick the method variant for an expected output of `outsize` bytes.
pub fn select_method(outsize: usize) -> Result<MethodVariant, ValidationError> {
    if outsize > MAX_OUTPUT_SIZE {
        return Err(ValidationError::OutputTooLarge(outsize));
    }
    let variant = if outsize > 1024 {
        MethodVariant::Large
    } else if outsize > 128 {
        MethodVariant::Medium
    } else if outsize > 4 {
        MethodVariant::Small
    } else if outsize > 0 {
        MethodVariant::Dword
    } else {
        MethodVariant::NoOutput
    };
    Ok(variant)
}
