//! Windows API layer for process queries
//!
//! Provides safe wrappers around the Win32 functions used to open and
//! interrogate processes. All unsafe FFI calls are contained within this
//! module with proper error handling and validation.

pub mod bindings;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use types::Handle;
pub use utils::{ErrorCode, WinError};

// Re-export key bindings
pub use bindings::{advapi32, kernel32, ntdll};
