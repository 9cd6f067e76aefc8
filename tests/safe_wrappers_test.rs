//! Integration tests for the safe wrapper modules

use kernel32_bindings::locale::{format_number, NumberFormat};
use kernel32_bindings::memory::{move_memory, GlobalMemory};
use kernel32_bindings::system::{logical_drives, mul_div, profile_string, WindowsVersion};
use kernel32_bindings::time::{file_time_to_system_time, system_time_to_file_time};
use kernel32_bindings::{FileTime, GlobalAllocFlags, Kernel32Error, Lcid, SystemTime};

#[test]
fn test_argument_checks_precede_native_calls() {
    let mut short = [0u8; 1];
    assert!(matches!(
        move_memory(&mut short, b"too long"),
        Err(Kernel32Error::BufferTooSmall { .. })
    ));
    assert!(matches!(
        profile_string("sec\0tion", "key", ""),
        Err(Kernel32Error::InvalidArgument(_))
    ));
}

#[test]
fn test_version_decoding() {
    let v = WindowsVersion::from_raw(0x4A61_0A06);
    assert_eq!(v.to_string(), "6.10.19041");
}

#[test]
#[cfg(not(target_os = "windows"))]
fn test_native_calls_fail_cleanly_off_windows() {
    assert!(matches!(mul_div(1, 1, 1), Err(Kernel32Error::Resolve(_))));
    assert!(matches!(
        GlobalMemory::alloc(GlobalAllocFlags::GPTR, 8),
        Err(Kernel32Error::Resolve(_))
    ));
    assert!(matches!(
        file_time_to_system_time(&FileTime::default()),
        Err(Kernel32Error::Resolve(_))
    ));
    assert!(matches!(
        format_number(Lcid::INVARIANT, "1", None),
        Err(Kernel32Error::Resolve(_))
    ));
    assert!(matches!(logical_drives(), Err(Kernel32Error::Resolve(_))));
}

#[test]
#[cfg(target_os = "windows")]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_global_memory_workflow() {
    let mut memory = GlobalMemory::alloc(GlobalAllocFlags::GHND, 32).unwrap();
    {
        let mut guard = memory.lock().unwrap();
        move_memory(&mut guard, b"payload").unwrap();
    }
    let raw = memory.into_raw();

    // Re-adopt, as a consumer handed an HGLOBAL would
    let mut memory = unsafe { GlobalMemory::from_raw(raw, 32, GlobalAllocFlags::GHND).unwrap() };
    let guard = memory.lock().unwrap();
    assert_eq!(&guard[..7], b"payload");
    assert!(guard[7..].iter().all(|&b| b == 0));
}

#[test]
#[cfg(target_os = "windows")]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_time_conversion_workflow() {
    let st = SystemTime::new(2000, 1, 1, 12, 0, 0);
    let ft = system_time_to_file_time(&st).unwrap();
    assert_eq!(ft.as_u64(), 125_912_016_000_000_000);
    let back = file_time_to_system_time(&ft).unwrap();
    // 2000-01-01 was a Saturday
    assert_eq!(back.day_of_week, 6);
    assert_eq!((back.year, back.hour), (2000, 12));
}

#[test]
#[cfg(target_os = "windows")]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_number_formatting_workflow() {
    let format = NumberFormat::default()
        .with_digits(0)
        .with_separators(".", "'");
    let formatted = format_number(Lcid::INVARIANT, "9876543", Some(&format)).unwrap();
    assert_eq!(formatted, "9'876'543");
}
