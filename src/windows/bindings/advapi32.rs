//! Advapi32.dll wrappers for token queries

use crate::core::types::{QueryError, QueryResult};
use crate::windows::utils::error_codes::{ErrorCode, WinError};
use std::ptr;
use winapi::shared::minwindef::{DWORD, FALSE};
use winapi::shared::winerror::ERROR_INSUFFICIENT_BUFFER;
use winapi::um::errhandlingapi::GetLastError;
use winapi::um::processthreadsapi::OpenProcessToken;
use winapi::um::securitybaseapi::GetTokenInformation;
use winapi::um::winnt::{TokenUser, HANDLE, TOKEN_QUERY};

/// Open the query-only token of `process`
pub fn open_process_token(process: HANDLE) -> QueryResult<HANDLE> {
    let mut token: HANDLE = ptr::null_mut();
    // SAFETY: `process` is a valid process handle and `token` is a valid
    // out-parameter for the duration of the call.
    let ok = unsafe { OpenProcessToken(process, TOKEN_QUERY, &mut token) };
    if ok == FALSE || token.is_null() {
        Err(QueryError::rejected("OpenProcessToken"))
    } else {
        Ok(token)
    }
}

/// Fetch the token's user block with the probe-then-fetch pattern.
///
/// The zero-length sizing call is expected to fail with
/// `ERROR_INSUFFICIENT_BUFFER`; any other outcome on it is surfaced. The
/// returned buffer holds a `TOKEN_USER` header followed by the account SID.
pub fn token_user_block(token: HANDLE) -> QueryResult<Vec<u8>> {
    let mut needed: DWORD = 0;
    // SAFETY: a null destination with zero length is the documented pattern
    // to query the required buffer size.
    let ok = unsafe { GetTokenInformation(token, TokenUser, ptr::null_mut(), 0, &mut needed) };
    if ok == FALSE {
        // SAFETY: GetLastError only reads thread-local state.
        let code = unsafe { GetLastError() };
        if code != ERROR_INSUFFICIENT_BUFFER {
            return Err(
                WinError::with_code("GetTokenInformation", ErrorCode::from(code)).into(),
            );
        }
    }

    let mut block: Vec<u8> = Vec::new();
    block
        .try_reserve_exact(needed as usize)
        .map_err(|_| QueryError::allocation(needed as usize))?;
    block.resize(needed as usize, 0);

    // SAFETY: `block` is a writable allocation of `needed` bytes matching
    // the pointer and length passed in.
    let ok = unsafe {
        GetTokenInformation(
            token,
            TokenUser,
            block.as_mut_ptr() as *mut _,
            needed,
            &mut needed,
        )
    };
    if ok == FALSE {
        // block drops here; nothing is cached on failure
        return Err(WinError::last("GetTokenInformation").into());
    }
    Ok(block)
}
