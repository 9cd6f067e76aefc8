//! Locale queries and number formatting

pub mod number;

pub use number::{
    format_integer, format_number, format_number_with_flags, thread_locale, NumberFormat,
    LOCALE_NOUSEROVERRIDE,
};
