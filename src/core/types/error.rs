//! Custom error types for kernel32-bindings

use crate::windows::utils::ErrorCode;
use thiserror::Error;

/// Failure to populate a slot of the symbol table
///
/// Stored inside the process-wide table, hence `Clone`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Failed to load library {library}: {code}")]
    LibraryNotFound { library: String, code: ErrorCode },

    #[error("Symbol {symbol} not found in {library}: {code}")]
    SymbolNotFound {
        library: String,
        symbol: &'static str,
        code: ErrorCode,
    },

    #[error("Invalid library name: {0}")]
    InvalidLibraryName(String),

    #[error("Dynamic loading of {0} is only supported on Windows")]
    UnsupportedPlatform(String),
}

/// Main error type for kernel32 calls
#[derive(Error, Debug)]
pub enum Kernel32Error {
    #[error("Symbol resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    #[error("{function} failed: {code}")]
    ApiCall {
        function: &'static str,
        code: ErrorCode,
    },

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Buffer too small: expected {expected}, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("Symbol table lock poisoned")]
    TablePoisoned,
}

/// Result type alias for kernel32 calls
pub type Kernel32Result<T> = Result<T, Kernel32Error>;

impl Kernel32Error {
    /// Creates an API call error for the given export and error code
    pub fn api_call(function: &'static str, code: impl Into<ErrorCode>) -> Self {
        Kernel32Error::ApiCall {
            function,
            code: code.into(),
        }
    }

    /// Creates a buffer too small error
    pub fn buffer_too_small(expected: usize, actual: usize) -> Self {
        Kernel32Error::BufferTooSmall { expected, actual }
    }

    /// Win32 error code carried by this error, if any
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Kernel32Error::ApiCall { code, .. } => Some(*code),
            Kernel32Error::Resolve(ResolveError::LibraryNotFound { code, .. })
            | Kernel32Error::Resolve(ResolveError::SymbolNotFound { code, .. }) => Some(*code),
            _ => None,
        }
    }
}
