//! Per-process query session lifecycle

use crate::core::types::{ProcessId, QueryError, QueryResult};
use crate::process::provider::QueryProvider;
use crate::windows::bindings::{advapi32, kernel32};
use crate::windows::types::Handle;
use tracing::debug;
use winapi::um::winnt::{PROCESS_QUERY_INFORMATION, PROCESS_VM_READ};

/// An open, stateful query session for one target process.
///
/// Owns a query-only process handle and the matching token handle, plus
/// lazily populated identity and image caches. The resolvers take
/// `&mut self`, so shared use across threads must be serialized by the
/// caller; the borrowed provider itself is freely shareable.
pub struct ProcessQuery<'p> {
    // Field order is release order: caches, then token, then process handle.
    pub(crate) user: Option<Vec<u8>>,
    pub(crate) image: Option<Vec<u16>>,
    pub(crate) token: Option<Handle>,
    pub(crate) handle: Option<Handle>,
    pub(crate) provider: Option<&'p QueryProvider>,
    pid: ProcessId,
}

impl<'p> ProcessQuery<'p> {
    /// Open a query-only session bound to `provider` for `pid`.
    ///
    /// Requests no control or write access to the target. If the token
    /// cannot be opened, the process handle is released before returning;
    /// no resource outlives a failed open.
    pub(crate) fn open(provider: &'p QueryProvider, pid: ProcessId) -> QueryResult<Self> {
        if pid == 0 {
            return Err(QueryError::invalid_argument("process id must be non-zero"));
        }

        let handle = Handle::new(kernel32::open_process(
            pid,
            PROCESS_QUERY_INFORMATION | PROCESS_VM_READ,
        )?);
        // A token failure drops `handle` here, closing the process handle.
        let token = Handle::new(advapi32::open_process_token(handle.raw())?);

        debug!(pid, "opened process query session");
        Ok(ProcessQuery {
            user: None,
            image: None,
            token: Some(token),
            handle: Some(handle),
            provider: Some(provider),
            pid,
        })
    }

    /// The process identifier this session was opened for, zero once closed
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Whether the session still holds its handles
    pub fn is_open(&self) -> bool {
        self.handle.is_some() && self.token.is_some()
    }

    /// Release all session resources.
    ///
    /// Caches are dropped first, then the token handle, then the process
    /// handle. Safe to call any number of times; later calls are no-ops.
    pub fn close(&mut self) {
        if self.is_open() {
            debug!(pid = self.pid, "closing process query session");
        }
        self.user = None;
        self.image = None;
        self.token = None;
        self.handle = None;
        self.provider = None;
        self.pid = 0;
    }
}

impl Drop for ProcessQuery<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_zero_pid_is_invalid_argument() {
        let provider = QueryProvider::without_extended_query();
        let result = provider.open(0);
        match result {
            Err(QueryError::InvalidArgument(reason)) => {
                assert!(reason.contains("non-zero"));
            }
            _ => panic!("Expected InvalidArgument"),
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_open_self_and_close_twice() {
        let provider = QueryProvider::without_extended_query();
        let mut session = provider.open(std::process::id()).unwrap();
        assert!(session.is_open());
        assert_eq!(session.pid(), std::process::id());

        session.close();
        assert!(!session.is_open());
        assert_eq!(session.pid(), 0);

        // Second close is a no-op
        session.close();
        assert!(!session.is_open());
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_open_nonexistent_pid_is_system_rejected() {
        let provider = QueryProvider::without_extended_query();
        // PIDs are multiples of four; this value can never name a process
        let result = provider.open(u32::MAX - 1);
        assert!(matches!(result, Err(QueryError::SystemRejected { .. })));
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_drop_releases_without_fault() {
        let provider = QueryProvider::without_extended_query();
        {
            let _session = provider.open(std::process::id()).unwrap();
        }
        // Dropping the open session must not crash
    }
}
