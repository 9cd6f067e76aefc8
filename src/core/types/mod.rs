//! Core type definitions for kernel32-bindings

mod error;

pub use error::{Kernel32Error, Kernel32Result, ResolveError};
