//! Kernel32.dll wrappers for process handle operations

use crate::core::types::{QueryError, QueryResult};
use winapi::shared::minwindef::FALSE;
use winapi::um::handleapi::CloseHandle;
use winapi::um::processthreadsapi::{GetCurrentProcess, GetProcessHandleCount, OpenProcess};
use winapi::um::winnt::HANDLE;

/// Safe wrapper for OpenProcess
pub fn open_process(pid: u32, desired_access: u32) -> QueryResult<HANDLE> {
    // SAFETY: no pointer arguments; a null return signals failure.
    let handle = unsafe { OpenProcess(desired_access, FALSE, pid) };
    if handle.is_null() {
        Err(QueryError::rejected("OpenProcess"))
    } else {
        Ok(handle)
    }
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle or null.
pub unsafe fn close_handle(handle: HANDLE) -> QueryResult<()> {
    if handle.is_null() {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(QueryError::rejected("CloseHandle"))
    } else {
        Ok(())
    }
}

/// Number of handles currently open in the calling process
pub fn current_process_handle_count() -> QueryResult<u32> {
    let mut count = 0u32;
    // SAFETY: the pseudo handle needs no cleanup and `count` is a valid
    // out-parameter for the duration of the call.
    let ok = unsafe { GetProcessHandleCount(GetCurrentProcess(), &mut count) };
    if ok == FALSE {
        Err(QueryError::rejected("GetProcessHandleCount"))
    } else {
        Ok(count)
    }
}
