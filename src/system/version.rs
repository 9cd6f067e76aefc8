//! `GetVersion` decoding

use crate::core::types::Kernel32Result;
use crate::windows::bindings::kernel32;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version triple packed into the `GetVersion` DWORD
///
/// Applications without a compatibility manifest see the version the OS
/// chooses to report, not necessarily the running one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowsVersion {
    pub major: u8,
    pub minor: u8,
    /// Present only on NT-based systems (high bit clear)
    pub build: Option<u16>,
}

impl WindowsVersion {
    /// Unpack: low byte major, next byte minor, high word build
    pub fn from_raw(raw: u32) -> Self {
        let build = if raw & 0x8000_0000 == 0 {
            Some((raw >> 16) as u16)
        } else {
            None
        };
        WindowsVersion {
            major: (raw & 0xff) as u8,
            minor: ((raw >> 8) & 0xff) as u8,
            build,
        }
    }
}

impl fmt::Display for WindowsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.build {
            Some(build) => write!(f, "{}.{}.{}", self.major, self.minor, build),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

/// Raw `GetVersion` value
pub fn version_raw() -> Kernel32Result<u32> {
    kernel32()?.get_version()
}

/// Decoded `GetVersion` value
pub fn windows_version() -> Kernel32Result<WindowsVersion> {
    version_raw().map(WindowsVersion::from_raw)
}
