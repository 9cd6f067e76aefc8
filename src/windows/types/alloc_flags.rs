//! `GlobalAlloc` allocation flags

use super::constants::{GHND, GMEM_FIXED, GMEM_MOVEABLE, GMEM_ZEROINIT, GPTR};

/// Flags for `GlobalAlloc`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalAllocFlags {
    value: u32,
}

impl GlobalAllocFlags {
    /// Fixed memory; the handle is the pointer
    pub const FIXED: Self = Self { value: GMEM_FIXED };
    /// Moveable memory; must be locked to obtain a pointer
    pub const MOVEABLE: Self = Self {
        value: GMEM_MOVEABLE,
    };
    /// Zero-initialize the contents
    pub const ZEROINIT: Self = Self {
        value: GMEM_ZEROINIT,
    };
    /// `MOVEABLE | ZEROINIT`
    pub const GHND: Self = Self { value: GHND };
    /// `FIXED | ZEROINIT`
    pub const GPTR: Self = Self { value: GPTR };

    /// Combine flags
    pub fn combine(flags: &[Self]) -> Self {
        let mut value = 0;
        for flag in flags {
            value |= flag.value;
        }
        Self { value }
    }

    pub fn from_raw(value: u32) -> Self {
        Self { value }
    }

    /// Get raw value
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn contains(&self, other: Self) -> bool {
        self.value & other.value == other.value
    }

    pub fn is_moveable(&self) -> bool {
        self.contains(Self::MOVEABLE)
    }
}

impl Default for GlobalAllocFlags {
    fn default() -> Self {
        Self::FIXED
    }
}

impl std::ops::BitOr for GlobalAllocFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            value: self.value | rhs.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine() {
        let flags = GlobalAllocFlags::combine(&[
            GlobalAllocFlags::MOVEABLE,
            GlobalAllocFlags::ZEROINIT,
        ]);
        assert_eq!(flags, GlobalAllocFlags::GHND);
        assert_eq!(
            GlobalAllocFlags::FIXED | GlobalAllocFlags::ZEROINIT,
            GlobalAllocFlags::GPTR
        );
    }

    #[test]
    fn test_contains() {
        assert!(GlobalAllocFlags::GHND.is_moveable());
        assert!(GlobalAllocFlags::GHND.contains(GlobalAllocFlags::ZEROINIT));
        assert!(!GlobalAllocFlags::GPTR.is_moveable());
        assert_eq!(GlobalAllocFlags::default().value(), 0);
    }
}
