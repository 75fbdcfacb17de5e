//! Core module containing the fundamental types for Proc-Query
//!
//! This module provides the foundational building blocks used throughout
//! the library: the owner identity value, the command record, and the
//! error types shared by every query operation.

pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    OwnerIdentity,
    ProcessCommand,
    QueryError,
    QueryResult,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

// Platform verification at compile time
#[cfg(not(target_os = "windows"))]
compile_error!("Proc-Query only supports the Windows platform");
