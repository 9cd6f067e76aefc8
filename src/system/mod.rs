//! Process and system queries
//!
//! Version, logical drives, module handles, `win.ini` profile strings,
//! `MulDiv` and the thread's last-error slot.

pub mod drives;
pub mod module;
pub mod profile;
pub mod version;

pub use drives::logical_drives;
pub use module::{is_module_loaded, module_handle};
pub use profile::{profile_keys, profile_sections, profile_string};
pub use version::{version_raw, windows_version, WindowsVersion};

use crate::core::types::Kernel32Result;
use crate::windows::bindings::kernel32;
use crate::windows::utils::ErrorCode;

/// `MulDiv`: `number * numerator / denominator` with a 64-bit intermediate
///
/// The native routine rounds and reports overflow or a zero denominator as
/// -1; that value is passed back as is.
pub fn mul_div(number: i32, numerator: i32, denominator: i32) -> Kernel32Result<i32> {
    kernel32()?.mul_div(number, numerator, denominator)
}

/// Calling thread's last error
pub fn last_error() -> Kernel32Result<ErrorCode> {
    Ok(ErrorCode::from(kernel32()?.get_last_error()?))
}

/// Set the calling thread's last error
pub fn set_last_error(code: impl Into<ErrorCode>) -> Kernel32Result<()> {
    kernel32()?.set_last_error(code.into().raw())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(windows))]
    fn test_unavailable_off_windows() {
        assert!(mul_div(1, 2, 3).is_err());
        assert!(last_error().is_err());
    }

    #[test]
    #[cfg(windows)]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_mul_div() {
        assert_eq!(mul_div(10, 3, 2).unwrap(), 15);
        // Rounds half away from zero
        assert_eq!(mul_div(7, 1, 2).unwrap(), 4);
        // 64-bit intermediate
        assert_eq!(mul_div(i32::MAX, 2, 2).unwrap(), i32::MAX);
        assert_eq!(mul_div(5, 5, 0).unwrap(), -1);
    }

    #[test]
    #[cfg(windows)]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_last_error_slot() {
        set_last_error(ErrorCode::MoreData).unwrap();
        assert_eq!(last_error().unwrap(), ErrorCode::MoreData);
        set_last_error(0u32).unwrap();
        assert!(last_error().unwrap().is_success());
    }
}
