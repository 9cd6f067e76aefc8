//! Locale-aware number formatting through `GetNumberFormatW`

use crate::core::types::{Kernel32Error, Kernel32Result};
use crate::windows::bindings::kernel32;
use crate::windows::types::{Lcid, NumberFmt};
use crate::windows::utils::{string_to_wide_checked, wide_to_string};
use serde::{Deserialize, Serialize};
use std::ptr;
use tracing::debug;

/// `LOCALE_NOUSEROVERRIDE`: ignore user customizations of the locale
pub const LOCALE_NOUSEROVERRIDE: u32 = 0x8000_0000;

/// Owned number format, marshaled into a [`NumberFmt`] for each call
///
/// Field values are passed through untouched; the OS decides what they mean
/// and rejects what it does not accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub num_digits: u32,
    pub leading_zero: u32,
    pub grouping: u32,
    pub decimal_sep: String,
    pub thousand_sep: String,
    pub negative_order: u32,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            num_digits: 2,
            leading_zero: 1,
            grouping: 3,
            decimal_sep: ".".to_string(),
            thousand_sep: ",".to_string(),
            negative_order: 1,
        }
    }
}

impl NumberFormat {
    pub fn with_digits(mut self, num_digits: u32) -> Self {
        self.num_digits = num_digits;
        self
    }

    pub fn with_separators(
        mut self,
        decimal_sep: impl Into<String>,
        thousand_sep: impl Into<String>,
    ) -> Self {
        self.decimal_sep = decimal_sep.into();
        self.thousand_sep = thousand_sep.into();
        self
    }

    pub fn with_grouping(mut self, grouping: u32) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn with_negative_order(mut self, negative_order: u32) -> Self {
        self.negative_order = negative_order;
        self
    }
}

/// Wide buffers backing the separator pointers of a [`NumberFmt`]
struct MarshaledFormat {
    decimal_sep: Vec<u16>,
    thousand_sep: Vec<u16>,
    format: NumberFmt,
}

impl MarshaledFormat {
    fn new(format: &NumberFormat) -> Kernel32Result<Self> {
        let mut marshaled = MarshaledFormat {
            decimal_sep: string_to_wide_checked(&format.decimal_sep)?,
            thousand_sep: string_to_wide_checked(&format.thousand_sep)?,
            format: NumberFmt {
                num_digits: format.num_digits,
                leading_zero: format.leading_zero,
                grouping: format.grouping,
                decimal_sep: ptr::null_mut(),
                thousand_sep: ptr::null_mut(),
                negative_order: format.negative_order,
            },
        };
        marshaled.format.decimal_sep = marshaled.decimal_sep.as_mut_ptr();
        marshaled.format.thousand_sep = marshaled.thousand_sep.as_mut_ptr();
        Ok(marshaled)
    }
}

/// The calling thread's locale (`GetThreadLocale`)
pub fn thread_locale() -> Kernel32Result<Lcid> {
    Ok(Lcid(kernel32()?.get_thread_locale()?))
}

/// Format `value` (an unformatted decimal string such as `"-1234.5"`) for `locale`
///
/// With `format` set, it overrides the locale's own number settings.
pub fn format_number(
    locale: Lcid,
    value: &str,
    format: Option<&NumberFormat>,
) -> Kernel32Result<String> {
    format_number_with_flags(locale, 0, value, format)
}

/// [`format_number`] with explicit `dwFlags`
///
/// Flags must be 0 when `format` is given; the OS enforces this.
pub fn format_number_with_flags(
    locale: Lcid,
    flags: u32,
    value: &str,
    format: Option<&NumberFormat>,
) -> Kernel32Result<String> {
    let k32 = kernel32()?;
    let value_wide = string_to_wide_checked(value)?;
    let marshaled = format.map(MarshaledFormat::new).transpose()?;
    let format_ptr = marshaled
        .as_ref()
        .map_or(ptr::null(), |m| &m.format as *const NumberFmt);

    // First call sizes the output, including the terminating NUL
    // SAFETY: value_wide is NUL terminated and marshaled outlives both calls
    let required = unsafe {
        k32.get_number_format(
            locale.raw(),
            flags,
            value_wide.as_ptr(),
            format_ptr,
            ptr::null_mut(),
            0,
        )?
    };
    if required <= 0 {
        let code = k32.get_last_error()?;
        debug!(locale = %locale, value, code, "GetNumberFormatW size query failed");
        return Err(Kernel32Error::api_call("GetNumberFormatW", code));
    }

    let mut buffer = vec![0u16; required as usize];
    // SAFETY: buffer holds `required` elements
    let written = unsafe {
        k32.get_number_format(
            locale.raw(),
            flags,
            value_wide.as_ptr(),
            format_ptr,
            buffer.as_mut_ptr(),
            required,
        )?
    };
    if written <= 0 {
        let code = k32.get_last_error()?;
        debug!(locale = %locale, value, code, "GetNumberFormatW failed");
        return Err(Kernel32Error::api_call("GetNumberFormatW", code));
    }

    Ok(wide_to_string(&buffer[..written as usize]))
}

/// Format an integer for `locale` using the locale's own settings
pub fn format_integer(locale: Lcid, value: i64) -> Kernel32Result<String> {
    format_number(locale, &value.to_string(), None)
}
