//! Proc-Query library for Windows process introspection
//!
//! Opens query-only sessions against running processes and resolves the
//! owning account's identity and the on-disk image path per process.

pub mod core;
pub mod process;
pub mod windows;

// Re-export main types from core module
pub use crate::core::types::{OwnerIdentity, ProcessCommand, ProcessId, QueryError, QueryResult};

pub use process::{ProcessQuery, ProviderOptions, QueryProvider};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_module_accessible() {
        assert_eq!(crate::core::VERSION, env!("CARGO_PKG_VERSION"));
        assert_eq!(crate::core::AUTHORS, env!("CARGO_PKG_AUTHORS"));
    }

    #[test]
    fn test_identity_reexport() {
        let raw = [1u8, 1, 0, 0, 0, 0, 0, 5, 18, 0, 0, 0];
        let identity = OwnerIdentity::from_bytes(raw);
        assert_eq!(identity.revision(), 1);
        assert_eq!(identity.as_bytes(), &raw);
    }

    #[test]
    fn test_command_reexport() {
        let command = ProcessCommand::from_image("C:\\Windows\\notepad.exe");
        assert_eq!(command.image, "C:\\Windows\\notepad.exe");
        assert!(command.args.is_empty());
    }

    #[test]
    fn test_error_reexport() {
        let error = QueryError::invalid_argument("process id must be non-zero");
        assert!(error.to_string().contains("Invalid argument"));

        let result: QueryResult<u32> = Ok(42);
        assert!(result.is_ok());
    }

    #[test]
    fn test_process_id_reexport() {
        let pid: ProcessId = 1234;
        assert_eq!(pid, 1234);
    }

    #[test]
    fn test_provider_double_has_no_capability() {
        let provider = QueryProvider::without_extended_query();
        assert!(!provider.has_extended_query());
    }
}
