//! Dynamic library loading and export lookup

use crate::core::types::ResolveError;
use crate::windows::types::HMODULE;
use std::ffi::c_void;
use tracing::debug;

/// An owned module handle obtained from `LoadLibraryW`
#[derive(Debug)]
pub struct Library {
    name: String,
    module: HMODULE,
}

impl Library {
    /// Load a library by name or path
    pub fn open(name: &str) -> Result<Self, ResolveError> {
        if name.is_empty() || name.contains('\0') {
            return Err(ResolveError::InvalidLibraryName(name.to_string()));
        }
        let module = sys::load(name)?;
        debug!(library = name, "library loaded");
        Ok(Library {
            name: name.to_string(),
            module,
        })
    }

    /// Look up an exported entry point
    ///
    /// The returned pointer is non-null; callers cast it to the matching
    /// `extern "system"` signature.
    pub fn symbol(&self, symbol: &'static str) -> Result<*mut c_void, ResolveError> {
        sys::symbol(self.module, symbol).map_err(|code| ResolveError::SymbolNotFound {
            library: self.name.clone(),
            symbol,
            code,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn raw(&self) -> HMODULE {
        self.module
    }
}

impl Drop for Library {
    fn drop(&mut self) {
        sys::free(self.module);
    }
}

// Module handles are process-wide and usable from any thread
unsafe impl Send for Library {}
unsafe impl Sync for Library {}

#[cfg(windows)]
mod sys {
    use crate::core::types::ResolveError;
    use crate::windows::types::HMODULE;
    use crate::windows::utils::{string_to_wide, ErrorCode};
    use std::ffi::{c_void, CString};
    use winapi::shared::minwindef::HMODULE as WinHModule;
    use winapi::um::errhandlingapi::GetLastError;
    use winapi::um::libloaderapi::{FreeLibrary, GetProcAddress, LoadLibraryW};

    pub(super) fn load(name: &str) -> Result<HMODULE, ResolveError> {
        let wide = string_to_wide(name);
        // SAFETY: wide is a valid NUL-terminated UTF-16 string
        let module = unsafe { LoadLibraryW(wide.as_ptr()) };
        if module.is_null() {
            let code = unsafe { GetLastError() };
            return Err(ResolveError::LibraryNotFound {
                library: name.to_string(),
                code: ErrorCode::from(code),
            });
        }
        Ok(module as HMODULE)
    }

    pub(super) fn symbol(module: HMODULE, symbol: &str) -> Result<*mut c_void, ErrorCode> {
        // Export names never contain NUL
        let c_name = CString::new(symbol).map_err(|_| ErrorCode::InvalidParameter)?;
        // SAFETY: module came from LoadLibraryW and is still loaded
        let address = unsafe { GetProcAddress(module as WinHModule, c_name.as_ptr()) };
        if address.is_null() {
            Err(ErrorCode::from(unsafe { GetLastError() }))
        } else {
            Ok(address as *mut c_void)
        }
    }

    pub(super) fn free(module: HMODULE) {
        if !module.is_null() {
            // SAFETY: module came from LoadLibraryW; the reference count is
            // decremented exactly once per Library
            unsafe {
                FreeLibrary(module as WinHModule);
            }
        }
    }
}

#[cfg(not(windows))]
mod sys {
    use crate::core::types::ResolveError;
    use crate::windows::types::HMODULE;
    use crate::windows::utils::ErrorCode;
    use std::ffi::c_void;

    pub(super) fn load(name: &str) -> Result<HMODULE, ResolveError> {
        Err(ResolveError::UnsupportedPlatform(name.to_string()))
    }

    pub(super) fn symbol(_module: HMODULE, _symbol: &str) -> Result<*mut c_void, ErrorCode> {
        Err(ErrorCode::InvalidHandle)
    }

    pub(super) fn free(_module: HMODULE) {}
}
