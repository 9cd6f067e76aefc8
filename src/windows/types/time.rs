//! `FILETIME` and `SYSTEMTIME` mirrors

use serde::{Deserialize, Serialize};

/// 64-bit count of 100-nanosecond intervals, split in two halves (`FILETIME`)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileTime {
    pub low_date_time: u32,
    pub high_date_time: u32,
}

impl FileTime {
    /// Build from the packed 64-bit tick count
    pub fn from_u64(ticks: u64) -> Self {
        FileTime {
            low_date_time: ticks as u32,
            high_date_time: (ticks >> 32) as u32,
        }
    }

    /// Packed 64-bit tick count
    pub fn as_u64(&self) -> u64 {
        (u64::from(self.high_date_time) << 32) | u64::from(self.low_date_time)
    }
}

impl From<u64> for FileTime {
    fn from(ticks: u64) -> Self {
        FileTime::from_u64(ticks)
    }
}

/// Broken-down calendar time (`SYSTEMTIME`)
///
/// Field meaning and valid ranges are owned by the OS; this type only
/// carries the values across the boundary.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SystemTime {
    pub year: u16,
    pub month: u16,
    pub day_of_week: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
    pub milliseconds: u16,
}

impl SystemTime {
    /// Calendar date and time; `day_of_week` is left for the OS to fill or ignore
    pub fn new(year: u16, month: u16, day: u16, hour: u16, minute: u16, second: u16) -> Self {
        SystemTime {
            year,
            month,
            day_of_week: 0,
            day,
            hour,
            minute,
            second,
            milliseconds: 0,
        }
    }

    pub fn with_milliseconds(mut self, milliseconds: u16) -> Self {
        self.milliseconds = milliseconds;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::mem;

    #[test]
    fn test_layout() {
        assert_eq!(mem::size_of::<FileTime>(), 8);
        assert_eq!(mem::align_of::<FileTime>(), 4);
        assert_eq!(mem::size_of::<SystemTime>(), 16);
        assert_eq!(mem::align_of::<SystemTime>(), 2);
    }

    #[test]
    fn test_file_time_halves() {
        // 1970-01-01T00:00:00Z expressed in FILETIME ticks
        let unix_epoch = FileTime::from_u64(116_444_736_000_000_000);
        assert_eq!(unix_epoch.high_date_time, 0x019D_B1DE);
        assert_eq!(unix_epoch.low_date_time, 0xD53E_8000);
    }

    #[test]
    fn test_system_time_builder() {
        let st = SystemTime::new(2024, 2, 29, 13, 45, 30).with_milliseconds(250);
        assert_eq!(st.year, 2024);
        assert_eq!(st.day_of_week, 0);
        assert_eq!(st.milliseconds, 250);
    }

    proptest! {
        #[test]
        fn prop_file_time_packing_is_lossless(ticks in any::<u64>()) {
            prop_assert_eq!(FileTime::from(ticks).as_u64(), ticks);
        }
    }

    #[test]
    #[cfg(windows)]
    fn test_layout_matches_winapi() {
        use winapi::shared::minwindef::FILETIME;
        use winapi::um::minwinbase::SYSTEMTIME;

        assert_eq!(mem::size_of::<FileTime>(), mem::size_of::<FILETIME>());
        assert_eq!(mem::size_of::<SystemTime>(), mem::size_of::<SYSTEMTIME>());
    }
}
