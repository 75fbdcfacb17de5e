//! Owner identity resolution against the session token

use crate::core::types::{OwnerIdentity, QueryError, QueryResult};
use crate::process::session::ProcessQuery;
use crate::windows::bindings::advapi32;
use std::mem;
use std::ptr;
use tracing::debug;
use winapi::um::winnt::{SID, TOKEN_USER};

// The fixed identity prefix mirrors the OS layout exactly.
const _: () = assert!(OwnerIdentity::LEN == mem::size_of::<SID>());

impl ProcessQuery<'_> {
    /// Resolve the owning account's identity.
    ///
    /// The token user block is fetched and cached on first use; the account
    /// owning a process does not change after creation, so later calls copy
    /// from the cache without touching the OS. A failed fetch leaves the
    /// cache absent and a later call retries from scratch.
    pub fn owner_identity(&mut self) -> QueryResult<OwnerIdentity> {
        let token = match self.token.as_ref() {
            Some(token) => token,
            None => return Err(QueryError::invalid_argument("session is closed")),
        };

        if self.user.is_none() {
            let fetched = advapi32::token_user_block(token.raw())?;
            debug!(pid = self.pid(), len = fetched.len(), "cached token user block");
            self.user = Some(fetched);
        }

        let user = self.user.as_deref().unwrap_or_default();
        if user.len() < mem::size_of::<TOKEN_USER>() {
            return Err(QueryError::rejected_reason(
                "GetTokenInformation",
                "token user block shorter than its header",
            ));
        }

        // SAFETY: `user` was populated by GetTokenInformation(TokenUser) and
        // begins with a TOKEN_USER. read_unaligned because Vec<u8> does not
        // guarantee alignment for the target type.
        let header = unsafe { ptr::read_unaligned(user.as_ptr() as *const TOKEN_USER) };
        let sid = header.User.Sid;
        if sid.is_null() {
            return Err(QueryError::rejected_reason(
                "GetTokenInformation",
                "token user block carries no SID",
            ));
        }

        let mut raw = [0u8; OwnerIdentity::LEN];
        // SAFETY: the OS stores the SID inside the fetched block and its
        // fixed prefix spans at least `sizeof(SID)` bytes.
        unsafe { ptr::copy_nonoverlapping(sid as *const u8, raw.as_mut_ptr(), OwnerIdentity::LEN) };
        Ok(OwnerIdentity::from_bytes(raw))
    }
}

#[cfg(test)]
mod tests {
    use crate::process::provider::QueryProvider;
    use crate::core::types::QueryError;

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_closed_session_is_invalid_argument() {
        let provider = QueryProvider::without_extended_query();
        let mut session = provider.open(std::process::id()).unwrap();
        session.close();

        let result = session.owner_identity();
        assert!(matches!(result, Err(QueryError::InvalidArgument(_))));
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_identity_for_current_process() {
        let provider = QueryProvider::without_extended_query();
        let mut session = provider.open(std::process::id()).unwrap();

        let identity = session.owner_identity().unwrap();
        assert_eq!(identity.revision(), 1);
        assert!(identity.subauthority_count() >= 1);
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_repeat_queries_hit_the_cache() {
        let provider = QueryProvider::without_extended_query();
        let mut session = provider.open(std::process::id()).unwrap();

        let first = session.owner_identity().unwrap();
        let second = session.owner_identity().unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }
}
