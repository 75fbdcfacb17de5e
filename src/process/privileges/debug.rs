//! SeDebugPrivilege handling for wider process open rights

use crate::core::types::{QueryError, QueryResult};
use crate::windows::types::Handle;
use crate::windows::utils::string_conv::string_to_wide;
use std::mem;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};
use winapi::shared::minwindef::{DWORD, FALSE};
use winapi::um::processthreadsapi::{GetCurrentProcess, OpenProcessToken};
use winapi::um::securitybaseapi::AdjustTokenPrivileges;
use winapi::um::winbase::LookupPrivilegeValueW;
use winapi::um::winnt::{
    HANDLE, LUID, LUID_AND_ATTRIBUTES, SE_PRIVILEGE_ENABLED, TOKEN_ADJUST_PRIVILEGES,
    TOKEN_PRIVILEGES, TOKEN_QUERY,
};

static DEBUG_PRIVILEGE_ENABLED: AtomicBool = AtomicBool::new(false);

/// Whether a SeDebugPrivilege elevation attempt has succeeded in this process
pub fn has_debug_privilege() -> bool {
    DEBUG_PRIVILEGE_ENABLED.load(Ordering::Relaxed)
}

/// Enable SeDebugPrivilege on the calling process' own token.
///
/// Widens which processes can later be opened for query. Callers treating
/// the elevation as optional ignore the result.
pub fn enable_debug_privilege() -> QueryResult<()> {
    unsafe {
        let mut token: HANDLE = ptr::null_mut();
        if OpenProcessToken(
            GetCurrentProcess(),
            TOKEN_ADJUST_PRIVILEGES | TOKEN_QUERY,
            &mut token,
        ) == FALSE
        {
            return Err(QueryError::rejected("OpenProcessToken"));
        }
        // Released on every exit path below
        let _token = Handle::new(token);

        let mut luid = LUID {
            LowPart: 0,
            HighPart: 0,
        };
        let name = string_to_wide("SeDebugPrivilege");
        if LookupPrivilegeValueW(ptr::null(), name.as_ptr(), &mut luid) == FALSE {
            return Err(QueryError::rejected("LookupPrivilegeValueW"));
        }

        let mut privileges = TOKEN_PRIVILEGES {
            PrivilegeCount: 1,
            Privileges: [LUID_AND_ATTRIBUTES {
                Luid: luid,
                Attributes: SE_PRIVILEGE_ENABLED,
            }],
        };

        if AdjustTokenPrivileges(
            token,
            FALSE,
            &mut privileges,
            mem::size_of::<TOKEN_PRIVILEGES>() as DWORD,
            ptr::null_mut(),
            ptr::null_mut(),
        ) == FALSE
        {
            return Err(QueryError::rejected("AdjustTokenPrivileges"));
        }

        DEBUG_PRIVILEGE_ENABLED.store(true, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_debug_privilege_is_consistent() {
        let state = has_debug_privilege();
        assert_eq!(state, has_debug_privilege());
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_enable_debug_privilege_does_not_panic() {
        // May fail without admin rights; both outcomes are acceptable
        let result = enable_debug_privilege();
        if result.is_ok() {
            assert!(has_debug_privilege());
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_enable_debug_privilege_is_repeatable() {
        let first = enable_debug_privilege();
        let second = enable_debug_privilege();
        if first.is_ok() {
            assert!(second.is_ok());
            assert!(has_debug_privilege());
        }
    }
}
