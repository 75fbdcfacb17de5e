//! Custom error types for Proc-Query

use std::string::FromUtf16Error;
use thiserror::Error;
use winapi::shared::ntdef::NTSTATUS;

/// Main error type for process query operations
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Extended query capability unavailable: {0}")]
    UnavailableCapability(String),

    #[error("System rejected {operation}: {reason}")]
    SystemRejected {
        operation: &'static str,
        reason: String,
    },

    #[error("Buffer too small: expected {expected}, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("Encoding error: {0}")]
    EncodingError(#[from] FromUtf16Error),

    #[error("Allocation of {bytes} bytes failed")]
    AllocationFailure { bytes: usize },
}

/// Result type alias for process query operations
pub type QueryResult<T> = Result<T, QueryError>;

impl QueryError {
    /// Creates an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        QueryError::InvalidArgument(reason.into())
    }

    /// Creates an unavailable capability error
    pub fn unavailable(reason: impl Into<String>) -> Self {
        QueryError::UnavailableCapability(reason.into())
    }

    /// Creates a rejection error from the calling thread's last OS error
    pub fn rejected(operation: &'static str) -> Self {
        QueryError::SystemRejected {
            operation,
            reason: windows::core::Error::from_win32().to_string(),
        }
    }

    /// Creates a rejection error with an explicit reason
    pub fn rejected_reason(operation: &'static str, reason: impl Into<String>) -> Self {
        QueryError::SystemRejected {
            operation,
            reason: reason.into(),
        }
    }

    /// Creates a rejection error from an NT status code
    pub fn rejected_status(operation: &'static str, status: NTSTATUS) -> Self {
        QueryError::SystemRejected {
            operation,
            reason: format!("status 0x{:08X}", status as u32),
        }
    }

    /// Creates a buffer too small error
    pub fn buffer_too_small(expected: usize, actual: usize) -> Self {
        QueryError::BufferTooSmall { expected, actual }
    }

    /// Creates an allocation failure error
    pub fn allocation(bytes: usize) -> Self {
        QueryError::AllocationFailure { bytes }
    }
}
