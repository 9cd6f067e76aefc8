//! Kernel32 bindings
//!
//! [`library`] loads the DLL and looks up exports; [`kernel32`] holds the
//! resolved function pointer table and the one-to-one pass-through calls.

pub mod kernel32;
pub mod library;

pub use kernel32::{initialize, is_initialized, kernel32, Kernel32, EXPORTS};
pub use library::Library;
