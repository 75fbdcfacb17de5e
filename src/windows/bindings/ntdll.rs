//! Ntdll.dll types and wrappers for the extended process query

use crate::core::types::{QueryError, QueryResult};
use std::ptr;
use winapi::shared::ntdef::{NTSTATUS, PVOID, ULONG};
use winapi::um::winnt::HANDLE;

// NT status codes
pub const STATUS_SUCCESS: NTSTATUS = 0x00000000;
pub const STATUS_INFO_LENGTH_MISMATCH: NTSTATUS = 0xC0000004_u32 as i32;
pub const STATUS_ACCESS_DENIED: NTSTATUS = 0xC0000022_u32 as i32;

/// Information class selecting the native image path of a process
pub const PROCESS_IMAGE_FILE_NAME: ULONG = 27;

/// Signature of the dynamically resolved NtQueryInformationProcess entry point
pub type NtQueryInformationProcessFn = unsafe extern "system" fn(
    process_handle: HANDLE,
    process_information_class: ULONG,
    process_information: PVOID,
    process_information_length: ULONG,
    return_length: *mut ULONG,
) -> NTSTATUS;

/// Check if an NTSTATUS indicates success
pub fn nt_success(status: NTSTATUS) -> bool {
    status >= 0
}

/// Fetch the image file name block with the probe-then-fetch pattern.
///
/// The zero-length sizing call must fail with `STATUS_INFO_LENGTH_MISMATCH`,
/// which carries the required size; the sized call must then succeed. The
/// returned buffer holds a `UNICODE_STRING` header followed by the path data.
pub fn image_file_name_block(
    nqip: NtQueryInformationProcessFn,
    process: HANDLE,
) -> QueryResult<Vec<u8>> {
    let mut needed: ULONG = 0;
    // SAFETY: the zero-length call only writes the required size.
    let status = unsafe { nqip(process, PROCESS_IMAGE_FILE_NAME, ptr::null_mut(), 0, &mut needed) };
    if status != STATUS_INFO_LENGTH_MISMATCH {
        return Err(QueryError::rejected_status(
            "NtQueryInformationProcess",
            status,
        ));
    }

    let mut block: Vec<u8> = Vec::new();
    block
        .try_reserve_exact(needed as usize)
        .map_err(|_| QueryError::allocation(needed as usize))?;
    block.resize(needed as usize, 0);

    // SAFETY: `block` is a writable allocation of `needed` bytes matching
    // the pointer and length passed in.
    let status = unsafe {
        nqip(
            process,
            PROCESS_IMAGE_FILE_NAME,
            block.as_mut_ptr() as PVOID,
            needed,
            &mut needed,
        )
    };
    if !nt_success(status) {
        // block drops here; nothing is cached on failure
        return Err(QueryError::rejected_status(
            "NtQueryInformationProcess",
            status,
        ));
    }
    Ok(block)
}
