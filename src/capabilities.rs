//! Storage capability flags

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// A fixed bit set describing what the storage driver can do
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capabilities(u8);

impl Capabilities {
    /// No capabilities (the state of an uninitialized driver)
    pub const NONE: Capabilities = Capabilities(0);
    /// Folder contents can be listed
    pub const BROWSABLE: Capabilities = Capabilities(1);
    /// Stored files are reachable through public URLs
    pub const PUBLIC: Capabilities = Capabilities(2);
    /// Files and folders can be created, changed and removed
    pub const WRITABLE: Capabilities = Capabilities(4);

    /// Raw bit representation
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Build from raw bits, ignoring undefined ones
    pub fn from_bits(bits: u8) -> Self {
        Capabilities(bits) & (Self::BROWSABLE | Self::PUBLIC | Self::WRITABLE)
    }

    /// Whether all bits of `other` are set
    pub fn contains(self, other: Capabilities) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Capabilities {
    type Output = Capabilities;

    fn bitor(self, rhs: Capabilities) -> Capabilities {
        Capabilities(self.0 | rhs.0)
    }
}

impl BitOrAssign for Capabilities {
    fn bitor_assign(&mut self, rhs: Capabilities) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Capabilities {
    type Output = Capabilities;

    fn bitand(self, rhs: Capabilities) -> Capabilities {
        Capabilities(self.0 & rhs.0)
    }
}

impl BitAndAssign for Capabilities {
    fn bitand_assign(&mut self, rhs: Capabilities) {
        self.0 &= rhs.0;
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(Self::BROWSABLE) {
            names.push("BROWSABLE");
        }
        if self.contains(Self::PUBLIC) {
            names.push("PUBLIC");
        }
        if self.contains(Self::WRITABLE) {
            names.push("WRITABLE");
        }
        if names.is_empty() {
            names.push("NONE");
        }
        write!(f, "Capabilities({})", names.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_composition() {
        let all = Capabilities::BROWSABLE | Capabilities::PUBLIC | Capabilities::WRITABLE;
        assert_eq!(all.bits(), 7);
        assert!(all.contains(Capabilities::PUBLIC));
        assert!(!Capabilities::NONE.contains(Capabilities::PUBLIC));
    }

    #[test]
    fn test_mask_intersection() {
        let all = Capabilities::BROWSABLE | Capabilities::PUBLIC | Capabilities::WRITABLE;
        let masked = all & (Capabilities::BROWSABLE | Capabilities::WRITABLE);
        assert!(masked.contains(Capabilities::BROWSABLE));
        assert!(masked.contains(Capabilities::WRITABLE));
        assert!(!masked.contains(Capabilities::PUBLIC));
    }

    #[test]
    fn test_from_bits_drops_undefined() {
        assert_eq!(Capabilities::from_bits(0xFF).bits(), 7);
    }
}
