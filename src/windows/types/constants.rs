//! Numeric constants shared with the native ABI

/// Maximum path length in characters, including the terminating NUL
pub const MAX_PATH: usize = 260;

// Error codes
pub const ERROR_SUCCESS: u32 = 0;
pub const ERROR_FILE_NOT_FOUND: u32 = 2;
pub const ERROR_INVALID_PARAMETER: u32 = 87;
pub const ERROR_INSUFFICIENT_BUFFER: u32 = 122;
pub const ERROR_MORE_DATA: u32 = 234;

// GlobalAlloc flags
pub const GMEM_FIXED: u32 = 0x0000;
pub const GMEM_MOVEABLE: u32 = 0x0002;
pub const GMEM_ZEROINIT: u32 = 0x0040;
pub const GHND: u32 = GMEM_MOVEABLE | GMEM_ZEROINIT;
pub const GPTR: u32 = GMEM_FIXED | GMEM_ZEROINIT;

// Predefined locale ids
pub const LOCALE_INVARIANT: u32 = 0x007f;
pub const LOCALE_USER_DEFAULT: u32 = 0x0400;
pub const LOCALE_SYSTEM_DEFAULT: u32 = 0x0800;
