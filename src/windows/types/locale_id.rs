//! Locale identifiers

use super::constants::{LOCALE_INVARIANT, LOCALE_SYSTEM_DEFAULT, LOCALE_USER_DEFAULT};
use super::LCID;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Typed wrapper around a raw `LCID`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lcid(pub LCID);

impl Lcid {
    pub const INVARIANT: Self = Lcid(LOCALE_INVARIANT);
    pub const USER_DEFAULT: Self = Lcid(LOCALE_USER_DEFAULT);
    pub const SYSTEM_DEFAULT: Self = Lcid(LOCALE_SYSTEM_DEFAULT);

    pub fn raw(self) -> LCID {
        self.0
    }

    /// Primary language id (low 10 bits of the language id)
    pub fn primary_language(self) -> u16 {
        (self.0 & 0x3ff) as u16
    }

    /// Sublanguage id (bits 10..16 of the language id)
    pub fn sub_language(self) -> u16 {
        ((self.0 & 0xffff) >> 10) as u16
    }
}

impl From<LCID> for Lcid {
    fn from(raw: LCID) -> Self {
        Lcid(raw)
    }
}

impl fmt::Display for Lcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}
