//! Windows API bindings
//!
//! Low-level FFI wrappers grouped by the system library that exports them.

pub mod advapi32;
pub mod kernel32;
pub mod ntdll;
