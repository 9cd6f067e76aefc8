//! Native type definitions mirrored from the kernel32 ABI

pub mod alloc_flags;
pub mod constants;
pub mod handle;
pub mod locale_id;
pub mod number_format;
pub mod time;

use std::ffi::c_void;

// Re-export commonly used types
pub use alloc_flags::GlobalAllocFlags;
pub use handle::{Handle, INVALID_HANDLE_VALUE};
pub use locale_id::Lcid;
pub use number_format::NumberFmt;
pub use time::{FileTime, SystemTime};

pub type BOOL = i32;
pub type ATOM = u16;
pub type HANDLE = *mut c_void;
pub type HGLOBAL = HANDLE;
pub type HINSTANCE = HANDLE;
pub type HMODULE = HINSTANCE;
pub type LCID = u32;
