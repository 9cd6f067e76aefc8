//! Kernel32.dll symbol table and pass-through calls
//!
//! Every entry point is resolved by export name when the table is loaded.
//! Each method marshals its arguments into the `extern "system"` signature,
//! invokes the resolved pointer and hands the native return value back
//! unchanged. Nothing here interprets what the OS returns.

use super::library::Library;
use crate::config::LibraryConfig;
use crate::core::types::{Kernel32Error, Kernel32Result, ResolveError};
use crate::windows::types::{
    FileTime, NumberFmt, SystemTime, BOOL, HANDLE, HGLOBAL, HINSTANCE, LCID,
};
use crate::windows::utils::ErrorCode;
use std::ffi::c_void;
use std::mem;
use std::ptr;
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// `ERROR_PROC_NOT_FOUND`, reported for slots left empty in lenient mode
const ERROR_PROC_NOT_FOUND: u32 = 127;

type CloseHandleFn = unsafe extern "system" fn(HANDLE) -> BOOL;
type FileTimeToSystemTimeFn = unsafe extern "system" fn(*const FileTime, *mut SystemTime) -> BOOL;
type GetLastErrorFn = unsafe extern "system" fn() -> u32;
type GetLogicalDriveStringsFn = unsafe extern "system" fn(u32, *mut u16) -> u32;
type GetModuleHandleFn = unsafe extern "system" fn(*const u16) -> HINSTANCE;
type GetNumberFormatFn =
    unsafe extern "system" fn(LCID, u32, *const u16, *const NumberFmt, *mut u16, i32) -> i32;
type GetProfileStringFn =
    unsafe extern "system" fn(*const u16, *const u16, *const u16, *mut u16, u32) -> u32;
type GetThreadLocaleFn = unsafe extern "system" fn() -> LCID;
type GetVersionFn = unsafe extern "system" fn() -> u32;
type GlobalAllocFn = unsafe extern "system" fn(u32, usize) -> HGLOBAL;
type GlobalFreeFn = unsafe extern "system" fn(HGLOBAL) -> HGLOBAL;
type GlobalLockFn = unsafe extern "system" fn(HGLOBAL) -> *mut c_void;
type GlobalUnlockFn = unsafe extern "system" fn(HGLOBAL) -> BOOL;
type MoveMemoryFn = unsafe extern "system" fn(*mut c_void, *const c_void, usize);
type MulDivFn = unsafe extern "system" fn(i32, i32, i32) -> i32;
type SetLastErrorFn = unsafe extern "system" fn(u32);
type SystemTimeToFileTimeFn = unsafe extern "system" fn(*const SystemTime, *mut FileTime) -> BOOL;

/// Export names resolved by [`Kernel32::load`], in table order
pub const EXPORTS: [&str; 17] = [
    "CloseHandle",
    "FileTimeToSystemTime",
    "GetLastError",
    "GetLogicalDriveStringsW",
    "GetModuleHandleW",
    "GetNumberFormatW",
    "GetProfileStringW",
    "GetThreadLocale",
    "GetVersion",
    "GlobalAlloc",
    "GlobalFree",
    "GlobalLock",
    "GlobalUnlock",
    "RtlMoveMemory",
    "MulDiv",
    "SetLastError",
    "SystemTimeToFileTime",
];

/// Resolved kernel32 entry points
pub struct Kernel32 {
    close_handle: Option<CloseHandleFn>,
    file_time_to_system_time: Option<FileTimeToSystemTimeFn>,
    get_last_error: Option<GetLastErrorFn>,
    get_logical_drive_strings: Option<GetLogicalDriveStringsFn>,
    get_module_handle: Option<GetModuleHandleFn>,
    get_number_format: Option<GetNumberFormatFn>,
    get_profile_string: Option<GetProfileStringFn>,
    get_thread_locale: Option<GetThreadLocaleFn>,
    get_version: Option<GetVersionFn>,
    global_alloc: Option<GlobalAllocFn>,
    global_free: Option<GlobalFreeFn>,
    global_lock: Option<GlobalLockFn>,
    global_unlock: Option<GlobalUnlockFn>,
    move_memory: Option<MoveMemoryFn>,
    mul_div: Option<MulDivFn>,
    set_last_error: Option<SetLastErrorFn>,
    system_time_to_file_time: Option<SystemTimeToFileTimeFn>,
    strict: bool,
    library: Library,
}

/// Resolve one export and cast it to its function pointer type
///
/// In lenient mode a missing export leaves the slot empty.
fn resolve<F: Copy>(
    library: &Library,
    strict: bool,
    symbol: &'static str,
) -> Result<Option<F>, ResolveError> {
    match library.symbol(symbol) {
        Ok(address) => {
            debug!(symbol, address = ?address, "resolved");
            // SAFETY: F is one of the extern "system" fn aliases above, all
            // pointer-sized, and the export has that signature
            Ok(Some(unsafe { cast::<F>(address) }))
        }
        Err(err) if !strict => {
            warn!(symbol, error = %err, "export missing, slot left empty");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

unsafe fn cast<F: Copy>(address: *mut c_void) -> F {
    debug_assert_eq!(mem::size_of::<F>(), mem::size_of::<*mut c_void>());
    mem::transmute_copy(&address)
}

impl Kernel32 {
    /// Open the configured library and resolve every export
    pub fn load(config: &LibraryConfig) -> Result<Self, ResolveError> {
        let library = Library::open(&config.name)?;
        let strict = config.strict;

        let table = Kernel32 {
            close_handle: resolve(&library, strict, "CloseHandle")?,
            file_time_to_system_time: resolve(&library, strict, "FileTimeToSystemTime")?,
            get_last_error: resolve(&library, strict, "GetLastError")?,
            get_logical_drive_strings: resolve(&library, strict, "GetLogicalDriveStringsW")?,
            get_module_handle: resolve(&library, strict, "GetModuleHandleW")?,
            get_number_format: resolve(&library, strict, "GetNumberFormatW")?,
            get_profile_string: resolve(&library, strict, "GetProfileStringW")?,
            get_thread_locale: resolve(&library, strict, "GetThreadLocale")?,
            get_version: resolve(&library, strict, "GetVersion")?,
            global_alloc: resolve(&library, strict, "GlobalAlloc")?,
            global_free: resolve(&library, strict, "GlobalFree")?,
            global_lock: resolve(&library, strict, "GlobalLock")?,
            global_unlock: resolve(&library, strict, "GlobalUnlock")?,
            move_memory: resolve(&library, strict, "RtlMoveMemory")?,
            mul_div: resolve(&library, strict, "MulDiv")?,
            set_last_error: resolve(&library, strict, "SetLastError")?,
            system_time_to_file_time: resolve(&library, strict, "SystemTimeToFileTime")?,
            strict,
            library,
        };

        info!(
            library = table.library.name(),
            resolved = table.resolved_symbols().len(),
            total = EXPORTS.len(),
            "symbol table populated"
        );
        Ok(table)
    }

    pub fn library_name(&self) -> &str {
        self.library.name()
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Exports that resolved to an entry point
    pub fn resolved_symbols(&self) -> Vec<&'static str> {
        let present = [
            self.close_handle.is_some(),
            self.file_time_to_system_time.is_some(),
            self.get_last_error.is_some(),
            self.get_logical_drive_strings.is_some(),
            self.get_module_handle.is_some(),
            self.get_number_format.is_some(),
            self.get_profile_string.is_some(),
            self.get_thread_locale.is_some(),
            self.get_version.is_some(),
            self.global_alloc.is_some(),
            self.global_free.is_some(),
            self.global_lock.is_some(),
            self.global_unlock.is_some(),
            self.move_memory.is_some(),
            self.mul_div.is_some(),
            self.set_last_error.is_some(),
            self.system_time_to_file_time.is_some(),
        ];
        EXPORTS
            .iter()
            .zip(present)
            .filter_map(|(name, ok)| ok.then_some(*name))
            .collect()
    }

    fn slot<F: Copy>(&self, slot: Option<F>, symbol: &'static str) -> Result<F, ResolveError> {
        slot.ok_or_else(|| ResolveError::SymbolNotFound {
            library: self.library.name().to_string(),
            symbol,
            code: ErrorCode::from(ERROR_PROC_NOT_FOUND),
        })
    }

    /// `CloseHandle`
    ///
    /// # Safety
    /// `handle` must be a handle owned by the caller; it is invalid afterwards.
    pub unsafe fn close_handle(&self, handle: HANDLE) -> Kernel32Result<bool> {
        let f = self.slot(self.close_handle, "CloseHandle")?;
        Ok(f(handle) != 0)
    }

    /// `FileTimeToSystemTime`
    pub fn file_time_to_system_time(
        &self,
        file_time: &FileTime,
        system_time: &mut SystemTime,
    ) -> Kernel32Result<bool> {
        let f = self.slot(self.file_time_to_system_time, "FileTimeToSystemTime")?;
        Ok(unsafe { f(file_time, system_time) } != 0)
    }

    /// `GetLastError`
    pub fn get_last_error(&self) -> Kernel32Result<u32> {
        let f = self.slot(self.get_last_error, "GetLastError")?;
        Ok(unsafe { f() })
    }

    /// `GetLogicalDriveStringsW`; the buffer length is passed as `nBufferLength`
    pub fn get_logical_drive_strings(&self, buffer: &mut [u16]) -> Kernel32Result<u32> {
        let f = self.slot(self.get_logical_drive_strings, "GetLogicalDriveStringsW")?;
        let len = u32::try_from(buffer.len())
            .map_err(|_| Kernel32Error::InvalidArgument("drive buffer too large".to_string()))?;
        let ptr = if buffer.is_empty() {
            ptr::null_mut()
        } else {
            buffer.as_mut_ptr()
        };
        Ok(unsafe { f(len, ptr) })
    }

    /// `GetModuleHandleW`
    ///
    /// # Safety
    /// `module_name` must be null or point to a NUL-terminated UTF-16 string.
    pub unsafe fn get_module_handle(&self, module_name: *const u16) -> Kernel32Result<HINSTANCE> {
        let f = self.slot(self.get_module_handle, "GetModuleHandleW")?;
        Ok(f(module_name))
    }

    /// `GetNumberFormatW`
    ///
    /// # Safety
    /// `value` must be a NUL-terminated UTF-16 string, `format` null or valid
    /// with live separator buffers, and `number` valid for `capacity` writes
    /// (or null when `capacity` is 0).
    pub unsafe fn get_number_format(
        &self,
        locale: LCID,
        flags: u32,
        value: *const u16,
        format: *const NumberFmt,
        number: *mut u16,
        capacity: i32,
    ) -> Kernel32Result<i32> {
        let f = self.slot(self.get_number_format, "GetNumberFormatW")?;
        Ok(f(locale, flags, value, format, number, capacity))
    }

    /// `GetProfileStringW`
    ///
    /// # Safety
    /// String arguments must be null or NUL-terminated UTF-16; `returned`
    /// must be valid for `size` writes.
    pub unsafe fn get_profile_string(
        &self,
        app_name: *const u16,
        key_name: *const u16,
        default: *const u16,
        returned: *mut u16,
        size: u32,
    ) -> Kernel32Result<u32> {
        let f = self.slot(self.get_profile_string, "GetProfileStringW")?;
        Ok(f(app_name, key_name, default, returned, size))
    }

    /// `GetThreadLocale`
    pub fn get_thread_locale(&self) -> Kernel32Result<LCID> {
        let f = self.slot(self.get_thread_locale, "GetThreadLocale")?;
        Ok(unsafe { f() })
    }

    /// `GetVersion`
    pub fn get_version(&self) -> Kernel32Result<u32> {
        let f = self.slot(self.get_version, "GetVersion")?;
        Ok(unsafe { f() })
    }

    /// `GlobalAlloc`
    pub fn global_alloc(&self, flags: u32, bytes: usize) -> Kernel32Result<HGLOBAL> {
        let f = self.slot(self.global_alloc, "GlobalAlloc")?;
        Ok(unsafe { f(flags, bytes) })
    }

    /// `GlobalFree`; returns null on success
    ///
    /// # Safety
    /// `mem` must come from `GlobalAlloc` and not have been freed.
    pub unsafe fn global_free(&self, mem: HGLOBAL) -> Kernel32Result<HGLOBAL> {
        let f = self.slot(self.global_free, "GlobalFree")?;
        Ok(f(mem))
    }

    /// `GlobalLock`
    ///
    /// # Safety
    /// `mem` must be a live `GlobalAlloc` handle.
    pub unsafe fn global_lock(&self, mem: HGLOBAL) -> Kernel32Result<*mut c_void> {
        let f = self.slot(self.global_lock, "GlobalLock")?;
        Ok(f(mem))
    }

    /// `GlobalUnlock`
    ///
    /// # Safety
    /// `mem` must be a live `GlobalAlloc` handle.
    pub unsafe fn global_unlock(&self, mem: HGLOBAL) -> Kernel32Result<bool> {
        let f = self.slot(self.global_unlock, "GlobalUnlock")?;
        Ok(f(mem) != 0)
    }

    /// `RtlMoveMemory` (exported as `MoveMemory` in the headers)
    ///
    /// # Safety
    /// Both regions must be valid for `length` bytes; they may overlap.
    pub unsafe fn move_memory(
        &self,
        destination: *mut c_void,
        source: *const c_void,
        length: usize,
    ) -> Kernel32Result<()> {
        let f = self.slot(self.move_memory, "RtlMoveMemory")?;
        f(destination, source, length);
        Ok(())
    }

    /// `MulDiv`
    pub fn mul_div(&self, number: i32, numerator: i32, denominator: i32) -> Kernel32Result<i32> {
        let f = self.slot(self.mul_div, "MulDiv")?;
        Ok(unsafe { f(number, numerator, denominator) })
    }

    /// `SetLastError`
    pub fn set_last_error(&self, code: u32) -> Kernel32Result<()> {
        let f = self.slot(self.set_last_error, "SetLastError")?;
        unsafe { f(code) };
        Ok(())
    }

    /// `SystemTimeToFileTime`
    pub fn system_time_to_file_time(
        &self,
        system_time: &SystemTime,
        file_time: &mut FileTime,
    ) -> Kernel32Result<bool> {
        let f = self.slot(self.system_time_to_file_time, "SystemTimeToFileTime")?;
        Ok(unsafe { f(system_time, file_time) } != 0)
    }
}

lazy_static::lazy_static! {
    static ref TABLE: Mutex<Option<&'static Kernel32>> = Mutex::new(None);
}

/// Set once the table is published; read without locking afterwards
static READY: AtomicPtr<Kernel32> = AtomicPtr::new(ptr::null_mut());

/// Populate the process-wide table from `config`
///
/// The first successful call wins and the table lives for the rest of the
/// process. Failures are not cached, so a later call may retry with a
/// different configuration. The library is loaded with no lock held, so a
/// loader callback may re-enter [`kernel32`] on the same thread.
pub fn initialize(config: &LibraryConfig) -> Kernel32Result<&'static Kernel32> {
    if let Some(table) = published()? {
        return Ok(already_initialized(table, config));
    }

    let loaded = Kernel32::load(config)?;

    let mut slot = TABLE.lock().map_err(|_| Kernel32Error::TablePoisoned)?;
    if let Some(table) = *slot {
        drop(slot);
        // Another caller won the race; release this copy's module reference
        drop(loaded);
        return Ok(already_initialized(table, config));
    }
    let table: &'static Kernel32 = Box::leak(Box::new(loaded));
    *slot = Some(table);
    READY.store(table as *const Kernel32 as *mut Kernel32, Ordering::Release);
    Ok(table)
}

fn published() -> Kernel32Result<Option<&'static Kernel32>> {
    let slot = TABLE.lock().map_err(|_| Kernel32Error::TablePoisoned)?;
    Ok(*slot)
}

fn already_initialized(table: &'static Kernel32, config: &LibraryConfig) -> &'static Kernel32 {
    if table.library_name() != config.name || table.is_strict() != config.strict {
        warn!(
            active = table.library_name(),
            requested = %config.name,
            "symbol table already initialized, ignoring new configuration"
        );
    }
    table
}

/// The process-wide table, initialized with the default configuration on first use
pub fn kernel32() -> Kernel32Result<&'static Kernel32> {
    let ready = READY.load(Ordering::Acquire);
    if !ready.is_null() {
        // SAFETY: READY only ever holds a leaked, never-freed table
        return Ok(unsafe { &*ready });
    }
    initialize(&LibraryConfig::default())
}

/// Whether the process-wide table has been populated
pub fn is_initialized() -> bool {
    !READY.load(Ordering::Acquire).is_null()
}
