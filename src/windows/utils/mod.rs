//! Windows utility functions

pub mod error_codes;
pub mod string_conv;

// Re-export commonly used utilities
pub use error_codes::{ErrorCode, WinError};
pub use string_conv::{split_multi_sz, string_to_wide, string_to_wide_checked, wide_to_string};
