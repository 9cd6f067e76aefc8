//! Logical drive enumeration

use crate::core::types::{Kernel32Error, Kernel32Result};
use crate::windows::bindings::kernel32;
use crate::windows::utils::split_multi_sz;
use tracing::debug;

/// Root paths of the logical drives, e.g. `["C:\\", "D:\\"]`
///
/// Asks for the required length, fills, and retries if drives appeared in
/// between.
pub fn logical_drives() -> Kernel32Result<Vec<String>> {
    let k32 = kernel32()?;
    let mut buffer: Vec<u16> = Vec::new();

    loop {
        let result = k32.get_logical_drive_strings(&mut buffer)? as usize;
        if result == 0 {
            let code = k32.get_last_error()?;
            if code == 0 {
                return Ok(Vec::new());
            }
            debug!(code, "GetLogicalDriveStringsW failed");
            return Err(Kernel32Error::api_call("GetLogicalDriveStringsW", code));
        }
        if result < buffer.len() {
            return Ok(split_multi_sz(&buffer[..=result]));
        }
        // Too small: result is the size needed, terminator included
        buffer = vec![0u16; result + 1];
    }
}
