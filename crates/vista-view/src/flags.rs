//! View State Flags
//!
//! One packed word per view; dynamic pseudo-class queries are O(1) reads.

use bitflags::bitflags;

bitflags! {
    /// UI state bits of a view
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ViewFlags: u32 {
        const VISIBLE   = 1 << 0;
        const DISABLED  = 1 << 1;
        const HOVER     = 1 << 2;
        const ACTIVE    = 1 << 3;
        const FOCUSED   = 1 << 4;
        const CHECKED   = 1 << 5;
        const FROZEN    = 1 << 6;
        const FOCUSABLE = 1 << 7;
    }
}

impl Default for ViewFlags {
    fn default() -> Self {
        ViewFlags::VISIBLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_visible_and_enabled() {
        let flags = ViewFlags::default();
        assert!(flags.contains(ViewFlags::VISIBLE));
        assert!(!flags.contains(ViewFlags::DISABLED));
    }
}
