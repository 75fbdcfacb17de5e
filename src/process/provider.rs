//! Shared provider of the extended process query capability

use crate::core::types::{ProcessId, QueryError, QueryResult};
use crate::process::privileges;
use crate::process::session::ProcessQuery;
use crate::windows::bindings::ntdll::NtQueryInformationProcessFn;
use crate::windows::utils::string_conv::string_to_wide;
use std::mem;
use tracing::debug;
use winapi::shared::minwindef::FARPROC;
use winapi::um::libloaderapi::{FreeLibrary, GetProcAddress, LoadLibraryW};

/// Options controlling provider initialization
#[derive(Debug, Clone)]
pub struct ProviderOptions {
    /// Attempt to enable SeDebugPrivilege during init
    pub enable_debug_privilege: bool,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        ProviderOptions {
            enable_debug_privilege: true,
        }
    }
}

/// Shared, read-only holder of the optional extended query capability.
///
/// The capability is resolved once at init and never mutated afterwards, so
/// any number of concurrently used sessions may borrow the same provider
/// without synchronization.
pub struct QueryProvider {
    nt_query_information_process: Option<NtQueryInformationProcessFn>,
}

impl QueryProvider {
    /// Initialize a provider with default options
    pub fn init() -> QueryResult<Self> {
        Self::init_with_options(&ProviderOptions::default())
    }

    /// Initialize a provider, resolving the extended query entry point.
    ///
    /// The SeDebugPrivilege elevation attempt widens which processes can
    /// later be opened; its failure is logged and never surfaced.
    pub fn init_with_options(options: &ProviderOptions) -> QueryResult<Self> {
        let capability = resolve_extended_query()?;
        debug!("resolved extended process query capability");

        if options.enable_debug_privilege {
            if let Err(err) = privileges::enable_debug_privilege() {
                debug!("debug privilege elevation skipped: {}", err);
            }
        }

        Ok(QueryProvider {
            nt_query_information_process: Some(capability),
        })
    }

    /// Build a provider carrying no extended query capability.
    ///
    /// Sessions opened from it can resolve owner identity, but image-path
    /// queries fail with `InvalidArgument`. Intended for testing.
    #[doc(hidden)]
    pub fn without_extended_query() -> Self {
        QueryProvider {
            nt_query_information_process: None,
        }
    }

    /// Whether the extended query capability was resolved
    pub fn has_extended_query(&self) -> bool {
        self.nt_query_information_process.is_some()
    }

    pub(crate) fn extended_query(&self) -> Option<NtQueryInformationProcessFn> {
        self.nt_query_information_process
    }

    /// Open a query-only session for the process identified by `pid`
    pub fn open(&self, pid: ProcessId) -> QueryResult<ProcessQuery<'_>> {
        ProcessQuery::open(self, pid)
    }
}

fn resolve_extended_query() -> QueryResult<NtQueryInformationProcessFn> {
    let library = string_to_wide("ntdll.dll");
    // SAFETY: `library` is a NUL-terminated UTF-16 string for the duration
    // of the call.
    let module = unsafe { LoadLibraryW(library.as_ptr()) };
    if module.is_null() {
        return Err(QueryError::unavailable("ntdll.dll could not be loaded"));
    }

    // SAFETY: `module` is a valid module handle and the name is a
    // NUL-terminated ANSI string.
    let entry =
        unsafe { GetProcAddress(module, b"NtQueryInformationProcess\0".as_ptr() as *const i8) };

    // ntdll stays mapped for the life of the process, so the resolved entry
    // point outlives the library reference released here.
    // SAFETY: `module` came from LoadLibraryW above.
    let _ = unsafe { FreeLibrary(module) };

    if entry.is_null() {
        return Err(QueryError::unavailable(
            "NtQueryInformationProcess entry point not found",
        ));
    }

    // SAFETY: the resolved entry point has the documented
    // NtQueryInformationProcess signature.
    Ok(unsafe { mem::transmute::<FARPROC, NtQueryInformationProcessFn>(entry) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_options_default() {
        let options = ProviderOptions::default();
        assert!(options.enable_debug_privilege);
    }

    #[test]
    fn test_without_extended_query() {
        let provider = QueryProvider::without_extended_query();
        assert!(!provider.has_extended_query());
        assert!(provider.extended_query().is_none());
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_init_resolves_capability() {
        // ntdll.dll is present in every Windows process
        let provider = QueryProvider::init().unwrap();
        assert!(provider.has_extended_query());
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_init_without_elevation_attempt() {
        let options = ProviderOptions {
            enable_debug_privilege: false,
        };
        let provider = QueryProvider::init_with_options(&options).unwrap();
        assert!(provider.has_extended_query());
    }

    #[test]
    fn test_open_zero_pid_makes_no_os_call() {
        // A capability-less double suffices: the pid check comes first
        let provider = QueryProvider::without_extended_query();
        let result = provider.open(0);
        assert!(matches!(result, Err(QueryError::InvalidArgument(_))));
    }
}
