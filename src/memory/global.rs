//! Global heap allocations (`GlobalAlloc` family) with RAII release

use crate::core::types::{Kernel32Error, Kernel32Result};
use crate::windows::bindings::{kernel32, Kernel32};
use crate::windows::types::constants::ERROR_SUCCESS;
use crate::windows::types::{GlobalAllocFlags, HGLOBAL};
use std::ffi::c_void;
use std::mem::ManuallyDrop;
use std::ops::{Deref, DerefMut};
use std::slice;
use tracing::debug;

/// An owned `HGLOBAL`, freed with `GlobalFree` on drop
pub struct GlobalMemory {
    handle: HGLOBAL,
    size: usize,
    flags: GlobalAllocFlags,
    k32: &'static Kernel32,
}

impl GlobalMemory {
    /// Allocate `size` bytes with `GlobalAlloc`
    pub fn alloc(flags: GlobalAllocFlags, size: usize) -> Kernel32Result<Self> {
        let k32 = kernel32()?;
        let handle = k32.global_alloc(flags.value(), size)?;
        if handle.is_null() {
            let code = k32.get_last_error()?;
            debug!(size, flags = flags.value(), code, "GlobalAlloc failed");
            return Err(Kernel32Error::api_call("GlobalAlloc", code));
        }
        Ok(GlobalMemory {
            handle,
            size,
            flags,
            k32,
        })
    }

    /// Take ownership of an existing allocation
    ///
    /// # Safety
    /// `handle` must come from `GlobalAlloc`, be at least `size` bytes, and
    /// not be owned elsewhere.
    pub unsafe fn from_raw(
        handle: HGLOBAL,
        size: usize,
        flags: GlobalAllocFlags,
    ) -> Kernel32Result<Self> {
        if handle.is_null() {
            return Err(Kernel32Error::InvalidHandle("null HGLOBAL".to_string()));
        }
        Ok(GlobalMemory {
            handle,
            size,
            flags,
            k32: kernel32()?,
        })
    }

    /// Release ownership without freeing, e.g. to hand the block to the clipboard
    pub fn into_raw(self) -> HGLOBAL {
        let this = ManuallyDrop::new(self);
        this.handle
    }

    pub fn raw(&self) -> HGLOBAL {
        self.handle
    }

    /// Size requested at allocation time
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn flags(&self) -> GlobalAllocFlags {
        self.flags
    }

    /// Lock the block and borrow its contents until the guard drops
    pub fn lock(&mut self) -> Kernel32Result<GlobalLockGuard<'_>> {
        // SAFETY: handle is live for as long as self
        let ptr = unsafe { self.k32.global_lock(self.handle)? };
        if ptr.is_null() {
            let code = self.k32.get_last_error()?;
            debug!(code, "GlobalLock failed");
            return Err(Kernel32Error::api_call("GlobalLock", code));
        }
        Ok(GlobalLockGuard {
            ptr: ptr as *mut u8,
            memory: self,
        })
    }

    /// Decrement the lock count once
    ///
    /// Returns whether the block is still locked. `GlobalUnlock` reports
    /// both "now unlocked" and failure as FALSE, so the last error is cleared
    /// first and inspected afterwards. Fixed blocks keep no lock count and
    /// `GlobalUnlock` always answers TRUE for them, so they report unlocked
    /// without a call.
    pub fn unlock_raw(&self) -> Kernel32Result<bool> {
        if !self.flags.is_moveable() {
            return Ok(false);
        }
        self.k32.set_last_error(ERROR_SUCCESS)?;
        // SAFETY: handle is live for as long as self
        let still_locked = unsafe { self.k32.global_unlock(self.handle)? };
        if still_locked {
            return Ok(true);
        }
        match self.k32.get_last_error()? {
            ERROR_SUCCESS => Ok(false),
            code => Err(Kernel32Error::api_call("GlobalUnlock", code)),
        }
    }

    /// Free now, reporting failure instead of swallowing it
    pub fn free(self) -> Kernel32Result<()> {
        let k32 = self.k32;
        let handle = self.into_raw();
        // SAFETY: ownership was just released from the wrapper
        let leftover = unsafe { k32.global_free(handle)? };
        if leftover.is_null() {
            Ok(())
        } else {
            Err(Kernel32Error::api_call("GlobalFree", k32.get_last_error()?))
        }
    }
}

impl Drop for GlobalMemory {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            // Ignore errors on cleanup
            unsafe {
                let _ = self.k32.global_free(self.handle);
            }
        }
    }
}

// HGLOBALs belong to the process heap, not to a thread
unsafe impl Send for GlobalMemory {}

/// Borrow of a locked global block; unlocks on drop
pub struct GlobalLockGuard<'a> {
    ptr: *mut u8,
    memory: &'a mut GlobalMemory,
}

impl GlobalLockGuard<'_> {
    pub fn as_ptr(&self) -> *const c_void {
        self.ptr as *const c_void
    }

    pub fn as_mut_ptr(&mut self) -> *mut c_void {
        self.ptr as *mut c_void
    }
}

impl Deref for GlobalLockGuard<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        // SAFETY: the block is locked and at least `size` bytes long
        unsafe { slice::from_raw_parts(self.ptr, self.memory.size) }
    }
}

impl DerefMut for GlobalLockGuard<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        // SAFETY: the block is locked, exclusively borrowed, and at least
        // `size` bytes long
        unsafe { slice::from_raw_parts_mut(self.ptr, self.memory.size) }
    }
}

impl Drop for GlobalLockGuard<'_> {
    fn drop(&mut self) {
        let _ = self.memory.unlock_raw();
    }
}

/// Copy `source` into the start of `destination` with `RtlMoveMemory`
pub fn move_memory(destination: &mut [u8], source: &[u8]) -> Kernel32Result<()> {
    if destination.len() < source.len() {
        return Err(Kernel32Error::buffer_too_small(
            source.len(),
            destination.len(),
        ));
    }
    if source.is_empty() {
        return Ok(());
    }
    let k32 = kernel32()?;
    // SAFETY: both slices are valid for source.len() bytes
    unsafe {
        k32.move_memory(
            destination.as_mut_ptr() as *mut c_void,
            source.as_ptr() as *const c_void,
            source.len(),
        )
    }
}

/// Copy `length` bytes inside one buffer, regions may overlap
pub fn move_within(buffer: &mut [u8], from: usize, to: usize, length: usize) -> Kernel32Result<()> {
    let end = from.max(to).checked_add(length).unwrap_or(usize::MAX);
    if end > buffer.len() {
        return Err(Kernel32Error::buffer_too_small(end, buffer.len()));
    }
    if length == 0 {
        return Ok(());
    }
    let k32 = kernel32()?;
    let base = buffer.as_mut_ptr();
    // SAFETY: both ranges were bounds-checked against the buffer above
    unsafe {
        k32.move_memory(
            base.add(to) as *mut c_void,
            base.add(from) as *const c_void,
            length,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_move_memory_rejects_short_destination() {
        let mut dst = [0u8; 2];
        let err = move_memory(&mut dst, &[1, 2, 3]).unwrap_err();
        assert!(matches!(
            err,
            Kernel32Error::BufferTooSmall {
                expected: 3,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_move_memory_empty_source_is_noop() {
        let mut dst = [7u8; 2];
        assert!(move_memory(&mut dst, &[]).is_ok());
        assert_eq!(dst, [7, 7]);
    }

    #[test]
    fn test_move_within_bounds() {
        let mut buffer = [0u8; 8];
        assert!(matches!(
            move_within(&mut buffer, 0, 6, 4),
            Err(Kernel32Error::BufferTooSmall { expected: 10, .. })
        ));
        assert!(move_within(&mut buffer, 2, 2, 0).is_ok());
    }

    #[test]
    fn test_from_raw_rejects_null() {
        let result = unsafe { GlobalMemory::from_raw(ptr::null_mut(), 16, GlobalAllocFlags::FIXED) };
        assert!(matches!(result, Err(Kernel32Error::InvalidHandle(_))));
    }

    #[test]
    #[cfg(windows)]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_alloc_lock_write_read() {
        let mut memory = GlobalMemory::alloc(GlobalAllocFlags::GHND, 64).unwrap();
        assert_eq!(memory.len(), 64);
        assert!(memory.flags().is_moveable());
        {
            let mut guard = memory.lock().unwrap();
            assert!(guard.iter().all(|&b| b == 0));
            guard[..5].copy_from_slice(b"hello");
        }
        {
            let guard = memory.lock().unwrap();
            assert_eq!(&guard[..5], b"hello");
        }
        memory.free().unwrap();
    }

    #[test]
    #[cfg(windows)]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_nested_lock_counts() {
        let memory = GlobalMemory::alloc(GlobalAllocFlags::GHND, 16).unwrap();
        let k32 = kernel32().unwrap();
        unsafe {
            assert!(!k32.global_lock(memory.raw()).unwrap().is_null());
            assert!(!k32.global_lock(memory.raw()).unwrap().is_null());
        }
        assert!(memory.unlock_raw().unwrap());
        assert!(!memory.unlock_raw().unwrap());
    }

    #[test]
    #[cfg(windows)]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_fixed_block_unlocks_immediately() {
        let mut memory = GlobalMemory::alloc(GlobalAllocFlags::GPTR, 8).unwrap();
        {
            let mut guard = memory.lock().unwrap();
            guard[0] = 0xAA;
        }
        assert!(!memory.unlock_raw().unwrap());
        let k32 = kernel32().unwrap();
        unsafe {
            assert!(!k32.global_lock(memory.raw()).unwrap().is_null());
        }
        assert!(!memory.unlock_raw().unwrap());
        memory.free().unwrap();
    }

    #[test]
    #[cfg(windows)]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_into_raw_and_back() {
        let memory = GlobalMemory::alloc(GlobalAllocFlags::GPTR, 8).unwrap();
        let raw = memory.into_raw();
        let memory = unsafe { GlobalMemory::from_raw(raw, 8, GlobalAllocFlags::GPTR).unwrap() };
        assert_eq!(memory.raw(), raw);
    }

    #[test]
    #[cfg(windows)]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_move_memory_copies() {
        let mut dst = [0u8; 6];
        move_memory(&mut dst, b"abc").unwrap();
        assert_eq!(&dst, b"abc\0\0\0");

        let mut buffer = *b"abcdef";
        move_within(&mut buffer, 0, 2, 4).unwrap();
        assert_eq!(&buffer, b"ababcd");
    }
}
