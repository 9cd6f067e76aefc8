//! Owned kernel object handle with automatic cleanup

use super::HANDLE;
use crate::core::types::{Kernel32Error, Kernel32Result};
use crate::windows::bindings::kernel32;
use crate::windows::utils::ErrorCode;
use std::ptr;

/// `INVALID_HANDLE_VALUE`, returned by some creators instead of null
pub const INVALID_HANDLE_VALUE: HANDLE = usize::MAX as HANDLE;

/// Safe wrapper around a kernel object HANDLE with RAII semantics
pub struct Handle {
    handle: HANDLE,
}

impl Handle {
    /// Take ownership of a raw handle
    pub fn new(handle: HANDLE) -> Self {
        Handle { handle }
    }

    /// Create a null handle
    pub fn null() -> Self {
        Handle {
            handle: ptr::null_mut(),
        }
    }

    /// Check if handle is null or `INVALID_HANDLE_VALUE`
    pub fn is_null(&self) -> bool {
        self.handle.is_null() || self.handle == INVALID_HANDLE_VALUE
    }

    /// Get the raw handle
    pub fn raw(&self) -> HANDLE {
        self.handle
    }

    /// Take ownership of the handle, preventing automatic cleanup
    pub fn take(mut self) -> HANDLE {
        let handle = self.handle;
        self.handle = ptr::null_mut();
        handle
    }

    /// Close the handle now, reporting failure instead of swallowing it
    pub fn close(self) -> Kernel32Result<()> {
        if self.is_null() {
            return Ok(());
        }
        let k32 = kernel32()?;
        let handle = self.take();
        // SAFETY: this wrapper owned the handle and nobody else closes it
        if unsafe { k32.close_handle(handle)? } {
            Ok(())
        } else {
            Err(Kernel32Error::api_call(
                "CloseHandle",
                ErrorCode::from(k32.get_last_error()?),
            ))
        }
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if !self.is_null() {
            // Ignore errors on cleanup
            if let Ok(k32) = kernel32() {
                unsafe {
                    let _ = k32.close_handle(self.handle);
                }
            }
        }
    }
}

// Send + Sync are safe because HANDLEs are process-local
unsafe impl Send for Handle {}
unsafe impl Sync for Handle {}
