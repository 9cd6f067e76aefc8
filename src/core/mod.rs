//! Core module containing the shared error types for kernel32-bindings
//!
//! Every layer of the crate (loader, symbol table, safe wrappers) reports
//! failures through the types defined here.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{Kernel32Error, Kernel32Result, ResolveError};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

#[cfg(not(any(target_pointer_width = "32", target_pointer_width = "64")))]
compile_error!("kernel32-bindings requires a 32- or 64-bit target");
