//! Runtime-resolved bindings for a fixed subset of kernel32.dll
//!
//! The symbol table in [`windows::bindings`] is populated once per process;
//! every call after that is a one-to-one pass-through to the native entry
//! point. The [`memory`], [`locale`], [`time`] and [`system`] modules add
//! safe marshaling on top: owned buffers, UTF-16 strings, RAII release and
//! last-error capture.

pub mod config;
pub mod core;
pub mod locale;
pub mod memory;
pub mod probe;
pub mod system;
pub mod time;
pub mod windows;

// Re-export main types from core module
pub use self::core::types::{Kernel32Error, Kernel32Result, ResolveError};

// Re-export the table entry points
pub use windows::bindings::{initialize, is_initialized, kernel32, Kernel32, EXPORTS};
pub use windows::types::{FileTime, GlobalAllocFlags, Handle, Lcid, SystemTime};
pub use windows::utils::ErrorCode;

pub use self::core::{AUTHORS, VERSION};
