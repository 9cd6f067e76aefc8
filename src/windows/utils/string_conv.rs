//! String conversion utilities for Windows API

use crate::core::types::{Kernel32Error, Kernel32Result};

/// Convert a Rust string to Windows wide string (UTF-16), NUL terminated
pub fn string_to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Like [`string_to_wide`], but rejects interior NULs that would silently
/// truncate the string on the native side
pub fn string_to_wide_checked(s: &str) -> Kernel32Result<Vec<u16>> {
    if s.contains('\0') {
        return Err(Kernel32Error::InvalidArgument(format!(
            "string contains an interior NUL: {:?}",
            s
        )));
    }
    Ok(string_to_wide(s))
}

/// Convert Windows wide string (UTF-16) to Rust string, stopping at the first NUL
pub fn wide_to_string(wide: &[u16]) -> String {
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}

/// Convert Windows wide string pointer to Rust string
///
/// # Safety
/// The pointer must be valid and point to a null-terminated UTF-16 string
pub unsafe fn wide_ptr_to_string(ptr: *const u16) -> String {
    if ptr.is_null() {
        return String::new();
    }

    let mut len = 0;
    while *ptr.add(len) != 0 {
        len += 1;
    }

    let slice = std::slice::from_raw_parts(ptr, len);
    wide_to_string(slice)
}

/// Split a double-NUL-terminated list of wide strings (`REG_MULTI_SZ` shape)
///
/// Parsing stops at the first empty entry.
pub fn split_multi_sz(buffer: &[u16]) -> Vec<String> {
    buffer
        .split(|&c| c == 0)
        .take_while(|entry| !entry.is_empty())
        .map(String::from_utf16_lossy)
        .collect()
}
