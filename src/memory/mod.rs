//! Global memory allocation and raw memory moves
//!
//! Safe wrappers over `GlobalAlloc`, `GlobalLock`, `GlobalUnlock`,
//! `GlobalFree` and `RtlMoveMemory`. Allocation policy stays with the OS;
//! these types only tie the handle lifetime to Rust ownership.

pub mod global;

pub use global::{move_memory, move_within, GlobalLockGuard, GlobalMemory};
