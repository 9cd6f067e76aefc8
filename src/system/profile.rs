//! `win.ini` lookups through `GetProfileStringW`

use crate::core::types::{Kernel32Error, Kernel32Result};
use crate::windows::bindings::kernel32;
use crate::windows::types::constants::MAX_PATH;
use crate::windows::utils::{split_multi_sz, string_to_wide_checked, wide_to_string};
use std::ptr;

/// Upper bound on the buffer, in UTF-16 units, before giving up on growth
const MAX_PROFILE_BUFFER: usize = 1 << 20;

/// Value of `key` in `[section]`, or `default` when absent
pub fn profile_string(section: &str, key: &str, default: &str) -> Kernel32Result<String> {
    let buffer = query(Some(section), Some(key), default)?;
    Ok(wide_to_string(&buffer))
}

/// All key names in `[section]`
pub fn profile_keys(section: &str) -> Kernel32Result<Vec<String>> {
    let buffer = query(Some(section), None, "")?;
    Ok(split_multi_sz(&buffer))
}

/// All section names
pub fn profile_sections() -> Kernel32Result<Vec<String>> {
    let buffer = query(None, None, "")?;
    Ok(split_multi_sz(&buffer))
}

/// Call `GetProfileStringW`, doubling the buffer while the result is truncated
///
/// Truncation shows up as `size - 1` for a single value and `size - 2` for
/// the NUL-separated lists returned when a name is omitted.
fn query(section: Option<&str>, key: Option<&str>, default: &str) -> Kernel32Result<Vec<u16>> {
    let section_wide = section.map(string_to_wide_checked).transpose()?;
    let key_wide = key.map(string_to_wide_checked).transpose()?;
    let default_wide = string_to_wide_checked(default)?;
    let k32 = kernel32()?;
    let truncation_margin = if section.is_some() && key.is_some() { 1 } else { 2 };

    let mut size = MAX_PATH;
    loop {
        let mut buffer = vec![0u16; size];
        let capacity = u32::try_from(size)
            .map_err(|_| Kernel32Error::InvalidArgument("profile buffer too large".to_string()))?;
        // SAFETY: every pointer is null or a live NUL-terminated buffer, and
        // buffer holds `size` elements
        let copied = unsafe {
            k32.get_profile_string(
                section_wide.as_ref().map_or(ptr::null(), |w| w.as_ptr()),
                key_wide.as_ref().map_or(ptr::null(), |w| w.as_ptr()),
                default_wide.as_ptr(),
                buffer.as_mut_ptr(),
                capacity,
            )?
        } as usize;

        if copied + truncation_margin < size {
            buffer.truncate(copied + truncation_margin);
            return Ok(buffer);
        }
        if size >= MAX_PROFILE_BUFFER {
            return Err(Kernel32Error::buffer_too_small(size * 2, size));
        }
        size *= 2;
    }
}
