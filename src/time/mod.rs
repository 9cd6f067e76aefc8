//! File-time conversion
//!
//! Both directions are delegated to the OS; a rejected input comes back as
//! an `ApiCall` error carrying the last error code.

use crate::core::types::{Kernel32Error, Kernel32Result};
use crate::windows::bindings::kernel32;
use crate::windows::types::{FileTime, SystemTime};
use tracing::debug;

/// `FileTimeToSystemTime`
pub fn file_time_to_system_time(file_time: &FileTime) -> Kernel32Result<SystemTime> {
    let k32 = kernel32()?;
    let mut system_time = SystemTime::default();
    if k32.file_time_to_system_time(file_time, &mut system_time)? {
        Ok(system_time)
    } else {
        let code = k32.get_last_error()?;
        debug!(ticks = file_time.as_u64(), code, "FileTimeToSystemTime failed");
        Err(Kernel32Error::api_call("FileTimeToSystemTime", code))
    }
}

/// `SystemTimeToFileTime`
pub fn system_time_to_file_time(system_time: &SystemTime) -> Kernel32Result<FileTime> {
    let k32 = kernel32()?;
    let mut file_time = FileTime::default();
    if k32.system_time_to_file_time(system_time, &mut file_time)? {
        Ok(file_time)
    } else {
        let code = k32.get_last_error()?;
        debug!(?system_time, code, "SystemTimeToFileTime failed");
        Err(Kernel32Error::api_call("SystemTimeToFileTime", code))
    }
}
