//! Windows error code handling utilities

use crate::core::types::Kernel32Error;
use crate::windows::types::constants::{
    ERROR_FILE_NOT_FOUND, ERROR_INSUFFICIENT_BUFFER, ERROR_INVALID_PARAMETER, ERROR_MORE_DATA,
    ERROR_SUCCESS,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Common Windows error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    Success,
    FileNotFound,
    AccessDenied,
    InvalidHandle,
    InvalidParameter,
    InsufficientBuffer,
    MoreData,
    Unknown(u32),
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            ERROR_SUCCESS => ErrorCode::Success,
            ERROR_FILE_NOT_FOUND => ErrorCode::FileNotFound,
            5 => ErrorCode::AccessDenied,
            6 => ErrorCode::InvalidHandle,
            ERROR_INVALID_PARAMETER => ErrorCode::InvalidParameter,
            ERROR_INSUFFICIENT_BUFFER => ErrorCode::InsufficientBuffer,
            ERROR_MORE_DATA => ErrorCode::MoreData,
            _ => ErrorCode::Unknown(code),
        }
    }
}

impl From<ErrorCode> for u32 {
    fn from(code: ErrorCode) -> Self {
        code.raw()
    }
}

impl ErrorCode {
    /// Raw numeric value
    pub fn raw(self) -> u32 {
        match self {
            ErrorCode::Success => ERROR_SUCCESS,
            ErrorCode::FileNotFound => ERROR_FILE_NOT_FOUND,
            ErrorCode::AccessDenied => 5,
            ErrorCode::InvalidHandle => 6,
            ErrorCode::InvalidParameter => ERROR_INVALID_PARAMETER,
            ErrorCode::InsufficientBuffer => ERROR_INSUFFICIENT_BUFFER,
            ErrorCode::MoreData => ERROR_MORE_DATA,
            ErrorCode::Unknown(code) => code,
        }
    }

    pub fn is_success(self) -> bool {
        self == ErrorCode::Success
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "Success"),
            ErrorCode::FileNotFound => write!(f, "File not found"),
            ErrorCode::AccessDenied => write!(f, "Access denied"),
            ErrorCode::InvalidHandle => write!(f, "Invalid handle"),
            ErrorCode::InvalidParameter => write!(f, "Invalid parameter"),
            ErrorCode::InsufficientBuffer => write!(f, "Insufficient buffer"),
            ErrorCode::MoreData => write!(f, "More data is available"),
            ErrorCode::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}

/// Error code paired with the export that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinError {
    code: ErrorCode,
    function: &'static str,
}

impl WinError {
    /// Create with specific error code
    pub fn with_code(code: impl Into<ErrorCode>, function: &'static str) -> Self {
        WinError {
            code: code.into(),
            function,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn function(&self) -> &'static str {
        self.function
    }

    /// Convert to Kernel32Error
    pub fn to_kernel32_error(self) -> Kernel32Error {
        Kernel32Error::api_call(self.function, self.code)
    }
}

impl From<WinError> for Kernel32Error {
    fn from(err: WinError) -> Self {
        err.to_kernel32_error()
    }
}
