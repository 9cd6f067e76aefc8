//! Smoke report exercising every safe wrapper once
//!
//! Used by the `kernel32-probe` binary to check that the table resolves and
//! each export answers on the machine at hand.

use crate::config::ProbeConfig;
use crate::core::types::Kernel32Result;
use crate::locale::{format_number, thread_locale};
use crate::memory::{move_memory, GlobalMemory};
use crate::system::{logical_drives, module_handle, mul_div, windows_version, WindowsVersion};
use crate::time::{file_time_to_system_time, system_time_to_file_time};
use crate::windows::bindings::Kernel32;
use crate::windows::types::{GlobalAllocFlags, Lcid, SystemTime};
use serde::{Deserialize, Serialize};
use tracing::info;

const PROBE_BYTES: &[u8] = b"kernel32-probe";

/// Everything the probe learned, serialized as JSON by the binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeReport {
    pub library: String,
    pub resolved_symbols: Vec<String>,
    pub version: WindowsVersion,
    pub thread_locale: Lcid,
    pub formatted_sample: String,
    pub unix_epoch_file_time: u64,
    pub unix_epoch_round_trip: SystemTime,
    pub mul_div_sample: i32,
    pub global_memory_round_trip: bool,
    pub executable_module_found: bool,
    pub drives: Option<Vec<String>>,
}

/// Run every probe against an initialized table
pub fn run(k32: &Kernel32, config: &ProbeConfig) -> Kernel32Result<ProbeReport> {
    let version = windows_version()?;
    info!(%version, "GetVersion");

    let locale = thread_locale()?;
    let formatted_sample = format_number(locale, &config.sample_number, None)?;
    info!(%locale, formatted = %formatted_sample, "GetNumberFormatW");

    let unix_epoch = system_time_to_file_time(&SystemTime::new(1970, 1, 1, 0, 0, 0))?;
    let unix_epoch_round_trip = file_time_to_system_time(&unix_epoch)?;

    let report = ProbeReport {
        library: k32.library_name().to_string(),
        resolved_symbols: k32
            .resolved_symbols()
            .into_iter()
            .map(str::to_string)
            .collect(),
        version,
        thread_locale: locale,
        formatted_sample,
        unix_epoch_file_time: unix_epoch.as_u64(),
        unix_epoch_round_trip,
        mul_div_sample: mul_div(1_000_000, 3, 7)?,
        global_memory_round_trip: global_memory_round_trip()?,
        executable_module_found: !module_handle(None)?.is_null(),
        drives: if config.list_drives {
            Some(logical_drives()?)
        } else {
            None
        },
    };
    Ok(report)
}

/// Allocate, fill through `RtlMoveMemory`, read back, free
fn global_memory_round_trip() -> Kernel32Result<bool> {
    let mut memory = GlobalMemory::alloc(GlobalAllocFlags::GHND, PROBE_BYTES.len())?;
    let matches = {
        let mut guard = memory.lock()?;
        move_memory(&mut guard, PROBE_BYTES)?;
        &guard[..] == PROBE_BYTES
    };
    memory.free()?;
    Ok(matches)
}

/// 1970-01-01T00:00:00Z in `FILETIME` ticks
pub const UNIX_EPOCH_TICKS: u64 = 116_444_736_000_000_000;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_serializes() {
        let report = ProbeReport {
            library: "kernel32.dll".to_string(),
            resolved_symbols: vec!["MulDiv".to_string()],
            version: WindowsVersion::from_raw(0x23F0_0206),
            thread_locale: Lcid(0x0409),
            formatted_sample: "1,234,567.89".to_string(),
            unix_epoch_file_time: UNIX_EPOCH_TICKS,
            unix_epoch_round_trip: SystemTime::new(1970, 1, 1, 0, 0, 0),
            mul_div_sample: 428_571,
            global_memory_round_trip: true,
            executable_module_found: true,
            drives: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"thread_locale\":1033"));
        let back: ProbeReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    #[cfg(windows)]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn test_run_probe() {
        let k32 = crate::windows::bindings::kernel32().unwrap();
        let report = run(k32, &ProbeConfig::default()).unwrap();
        assert_eq!(report.unix_epoch_file_time, UNIX_EPOCH_TICKS);
        assert_eq!(report.unix_epoch_round_trip.year, 1970);
        assert_eq!(report.mul_div_sample, 428_571);
        assert!(report.global_memory_round_trip);
        assert!(report.executable_module_found);
        assert!(!report.drives.unwrap().is_empty());
    }
}
