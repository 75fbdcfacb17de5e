//! Image path and command resolution via the extended query capability

use crate::core::types::{ProcessCommand, QueryError, QueryResult};
use crate::process::session::ProcessQuery;
use crate::windows::bindings::ntdll;
use std::mem;
use std::ptr;
use std::slice;
use tracing::debug;
use winapi::shared::ntdef::UNICODE_STRING;

impl ProcessQuery<'_> {
    /// Resolve the command used to start the process.
    ///
    /// Only the image path is recovered; `args` is always empty.
    // TODO: recover the argument list from the target's RTL_USER_PROCESS_PARAMETERS.
    pub fn command(&mut self) -> QueryResult<ProcessCommand> {
        let image = self.image_path()?;
        Ok(ProcessCommand::from_image(image))
    }

    /// Resolve the native image path as an owned narrow string
    pub fn image_path(&mut self) -> QueryResult<String> {
        let wide = self.resolve_image()?;
        Ok(String::from_utf16(wide)?)
    }

    /// Copy the native image path, NUL-terminated, into caller storage.
    ///
    /// `dest` must hold at least the path length plus the terminator, in
    /// UTF-16 units; on `BufferTooSmall` nothing is written. Returns the
    /// number of units written.
    pub fn image_path_wide(&mut self, dest: &mut [u16]) -> QueryResult<usize> {
        let wide = self.resolve_image()?;
        let required = wide.len() + 1;
        if dest.len() < required {
            return Err(QueryError::buffer_too_small(required, dest.len()));
        }
        dest[..wide.len()].copy_from_slice(wide);
        dest[wide.len()] = 0;
        Ok(required)
    }

    /// Populate the image cache on first use and borrow it.
    fn resolve_image(&mut self) -> QueryResult<&[u16]> {
        let handle = match self.handle.as_ref() {
            Some(handle) => handle,
            None => return Err(QueryError::invalid_argument("session is closed")),
        };
        let provider = match self.provider {
            Some(provider) => provider,
            None => return Err(QueryError::invalid_argument("session is closed")),
        };
        let nqip = match provider.extended_query() {
            Some(nqip) => nqip,
            None => {
                return Err(QueryError::invalid_argument(
                    "provider has no extended query capability",
                ))
            }
        };

        if self.image.is_none() {
            let block = ntdll::image_file_name_block(nqip, handle.raw())?;
            let wide = decode_image_block(&block)?;
            debug!(pid = self.pid(), units = wide.len(), "cached image path");
            self.image = Some(wide);
        }

        Ok(self.image.as_deref().unwrap_or_default())
    }
}

/// Extract the wide path out of a `UNICODE_STRING`-headed query block.
fn decode_image_block(block: &[u8]) -> QueryResult<Vec<u16>> {
    if block.len() < mem::size_of::<UNICODE_STRING>() {
        return Err(QueryError::rejected_reason(
            "NtQueryInformationProcess",
            "image name block shorter than its header",
        ));
    }

    // SAFETY: `block` was populated by
    // NtQueryInformationProcess(ProcessImageFileName) and begins with a
    // UNICODE_STRING. read_unaligned because Vec<u8> does not guarantee
    // alignment for the target type.
    let header = unsafe { ptr::read_unaligned(block.as_ptr() as *const UNICODE_STRING) };
    if header.Buffer.is_null() || header.Length == 0 {
        return Ok(Vec::new());
    }

    let units = header.Length as usize / 2;
    // SAFETY: `Buffer` points at `Length` bytes of UTF-16 data the OS wrote
    // inside `block`, valid for the duration of this borrow.
    let data = unsafe { slice::from_raw_parts(header.Buffer as *const u16, units) };

    let mut wide: Vec<u16> = Vec::new();
    wide.try_reserve_exact(units)
        .map_err(|_| QueryError::allocation(units * 2))?;
    wide.extend_from_slice(data);
    Ok(wide)
}
