//! `NUMBERFMTW` mirror

use std::ptr;

/// Raw number format descriptor passed to `GetNumberFormatW`
///
/// The separator pointers borrow NUL-terminated UTF-16 buffers owned by the
/// caller; see [`crate::locale::NumberFormat`] for an owning builder.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct NumberFmt {
    pub num_digits: u32,
    pub leading_zero: u32,
    pub grouping: u32,
    pub decimal_sep: *mut u16,
    pub thousand_sep: *mut u16,
    pub negative_order: u32,
}

impl Default for NumberFmt {
    fn default() -> Self {
        NumberFmt {
            num_digits: 0,
            leading_zero: 0,
            grouping: 0,
            decimal_sep: ptr::null_mut(),
            thousand_sep: ptr::null_mut(),
            negative_order: 0,
        }
    }
}
