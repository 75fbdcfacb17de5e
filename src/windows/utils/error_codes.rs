//! Windows error code handling utilities

use crate::core::types::QueryError;
use std::fmt;
use winapi::um::errhandlingapi::GetLastError;

/// Common Windows error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    AccessDenied,
    InvalidHandle,
    InvalidParameter,
    InsufficientBuffer,
    Unknown(u32),
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            0 => ErrorCode::Success,
            5 => ErrorCode::AccessDenied,
            6 => ErrorCode::InvalidHandle,
            87 => ErrorCode::InvalidParameter,
            122 => ErrorCode::InsufficientBuffer,
            _ => ErrorCode::Unknown(code),
        }
    }
}

impl ErrorCode {
    /// Get the last Windows error
    pub fn last_error() -> Self {
        // SAFETY: GetLastError only reads thread-local state.
        unsafe { ErrorCode::from(GetLastError()) }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "Success"),
            ErrorCode::AccessDenied => write!(f, "Access denied"),
            ErrorCode::InvalidHandle => write!(f, "Invalid handle"),
            ErrorCode::InvalidParameter => write!(f, "Invalid parameter"),
            ErrorCode::InsufficientBuffer => write!(f, "Insufficient buffer"),
            ErrorCode::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}

/// Windows error paired with the operation it failed
pub struct WinError {
    operation: &'static str,
    code: ErrorCode,
}

impl WinError {
    /// Capture the last Windows error for `operation`
    pub fn last(operation: &'static str) -> Self {
        WinError {
            operation,
            code: ErrorCode::last_error(),
        }
    }

    /// Create with a specific error code
    pub fn with_code(operation: &'static str, code: ErrorCode) -> Self {
        WinError { operation, code }
    }

    /// The captured error code
    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl From<WinError> for QueryError {
    fn from(err: WinError) -> Self {
        QueryError::rejected_reason(err.operation, err.code.to_string())
    }
}
