//! Safe HANDLE wrapper with automatic cleanup

use crate::windows::bindings::kernel32;
use winapi::um::winnt::HANDLE;

/// Owned Windows HANDLE released on drop
pub struct Handle {
    handle: HANDLE,
}

impl Handle {
    /// Wrap a raw handle, taking ownership of it
    pub fn new(handle: HANDLE) -> Self {
        Handle { handle }
    }

    /// Check if the handle is null
    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    /// Get the raw handle
    pub fn raw(&self) -> HANDLE {
        self.handle
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            // Errors on cleanup are ignored
            unsafe {
                let _ = kernel32::close_handle(self.handle);
            }
        }
    }
}

// Send + Sync are safe because HANDLEs are process-local
unsafe impl Send for Handle {}
unsafe impl Sync for Handle {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_wrapped_null_handle() {
        let handle = Handle::new(ptr::null_mut());
        assert!(handle.is_null());
        assert_eq!(handle.raw(), ptr::null_mut());
    }

    #[test]
    fn test_handle_drop_does_not_fault() {
        {
            let _handle = Handle::new(ptr::null_mut());
        }
        // Should not crash
    }
}
