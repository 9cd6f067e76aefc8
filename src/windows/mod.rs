//! Windows API layer
//!
//! Native data shapes, the runtime-resolved kernel32 symbol table and the
//! marshaling helpers used by the safe wrappers. All `extern "system"` calls
//! in the crate go through [`bindings::Kernel32`].

pub mod bindings;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use bindings::{kernel32, Kernel32};
pub use types::{FileTime, GlobalAllocFlags, Handle, Lcid, NumberFmt, SystemTime};
pub use utils::{ErrorCode, WinError};

/// Whether the native library can be loaded on this target at all
pub fn is_supported_platform() -> bool {
    cfg!(target_os = "windows")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_support() {
        #[cfg(target_os = "windows")]
        assert!(is_supported_platform());

        #[cfg(not(target_os = "windows"))]
        assert!(!is_supported_platform());
    }
}
