//! Core type definitions shared across the library

pub mod command;
pub mod error;
pub mod identity;

pub use command::ProcessCommand;
pub use error::{QueryError, QueryResult};
pub use identity::OwnerIdentity;

/// Process identifier type
pub type ProcessId = u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_id_type() {
        let pid: ProcessId = 4;
        assert_eq!(pid, 4u32);
    }

    #[test]
    fn test_types_accessible() {
        let _identity = OwnerIdentity::from_bytes([0u8; OwnerIdentity::LEN]);
        let _command = ProcessCommand::from_image("test.exe");
        let _result: QueryResult<()> = Err(QueryError::invalid_argument("test"));
    }
}
