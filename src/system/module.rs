//! Module handle lookup

use crate::core::types::{Kernel32Error, Kernel32Result};
use crate::windows::bindings::kernel32;
use crate::windows::types::HINSTANCE;
use crate::windows::utils::string_to_wide_checked;
use std::ptr;
use tracing::debug;

/// `GetModuleHandleW` for an already-loaded module, or the executable for `None`
///
/// The handle is not reference counted and must not be freed.
pub fn module_handle(name: Option<&str>) -> Kernel32Result<HINSTANCE> {
    let wide = name.map(string_to_wide_checked).transpose()?;
    let k32 = kernel32()?;
    let name_ptr = wide.as_ref().map_or(ptr::null(), |w| w.as_ptr());

    // SAFETY: name_ptr is null or a NUL-terminated buffer alive for the call
    let handle = unsafe { k32.get_module_handle(name_ptr)? };
    if handle.is_null() {
        let code = k32.get_last_error()?;
        debug!(module = name.unwrap_or("<self>"), code, "GetModuleHandleW failed");
        return Err(Kernel32Error::api_call("GetModuleHandleW", code));
    }
    Ok(handle)
}

/// Whether a module of that name is loaded in this process
pub fn is_module_loaded(name: &str) -> Kernel32Result<bool> {
    match module_handle(Some(name)) {
        Ok(_) => Ok(true),
        Err(Kernel32Error::ApiCall { .. }) => Ok(false),
        Err(err) => Err(err),
    }
}
