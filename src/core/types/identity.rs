//! Owner identity value for a queried process

use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed-size security-identifier prefix naming a process' owning account.
///
/// Holds the leading `sizeof(SID)` bytes of the account SID: revision,
/// subauthority count, the 48-bit identifier authority, and the first
/// subauthority. Callers always receive this by value, copied out of the
/// session's internal cache.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerIdentity {
    raw: [u8; Self::LEN],
}

impl OwnerIdentity {
    /// Size in bytes of the fixed identity prefix
    pub const LEN: usize = 12;

    /// Create an identity from its raw byte representation
    pub const fn from_bytes(raw: [u8; Self::LEN]) -> Self {
        OwnerIdentity { raw }
    }

    /// Raw byte representation
    pub const fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.raw
    }

    /// SID revision level
    pub fn revision(&self) -> u8 {
        self.raw[0]
    }

    /// Total number of subauthorities in the full SID
    pub fn subauthority_count(&self) -> u8 {
        self.raw[1]
    }

    /// 48-bit identifier authority, big-endian as stored in the SID
    pub fn identifier_authority(&self) -> u64 {
        self.raw[2..8]
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))
    }

    /// First subauthority, when the full SID carries at least one
    pub fn leading_subauthority(&self) -> Option<u32> {
        if self.subauthority_count() == 0 {
            return None;
        }
        // subauthorities are stored little-endian
        Some(u32::from_le_bytes([
            self.raw[8],
            self.raw[9],
            self.raw[10],
            self.raw[11],
        ]))
    }
}

impl fmt::Display for OwnerIdentity {
    /// Renders the prefix in `S-R-A[-S]` form, covering at most the
    /// leading subauthority.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}-{}", self.revision(), self.identifier_authority())?;
        if let Some(subauthority) = self.leading_subauthority() {
            write!(f, "-{}", subauthority)?;
        }
        Ok(())
    }
}

impl fmt::Debug for OwnerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OwnerIdentity({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // S-1-5-18, the LocalSystem account
    const LOCAL_SYSTEM: [u8; OwnerIdentity::LEN] = [1, 1, 0, 0, 0, 0, 0, 5, 18, 0, 0, 0];

    #[test]
    fn test_accessors() {
        let identity = OwnerIdentity::from_bytes(LOCAL_SYSTEM);
        assert_eq!(identity.revision(), 1);
        assert_eq!(identity.subauthority_count(), 1);
        assert_eq!(identity.identifier_authority(), 5);
        assert_eq!(identity.leading_subauthority(), Some(18));
    }

    #[test]
    fn test_display() {
        let identity = OwnerIdentity::from_bytes(LOCAL_SYSTEM);
        assert_eq!(identity.to_string(), "S-1-5-18");
    }

    #[test]
    fn test_display_without_subauthorities() {
        let mut raw = LOCAL_SYSTEM;
        raw[1] = 0;
        let identity = OwnerIdentity::from_bytes(raw);
        assert_eq!(identity.leading_subauthority(), None);
        assert_eq!(identity.to_string(), "S-1-5");
    }

    #[test]
    fn test_debug_uses_display_form() {
        let identity = OwnerIdentity::from_bytes(LOCAL_SYSTEM);
        assert_eq!(format!("{:?}", identity), "OwnerIdentity(S-1-5-18)");
    }

    #[test]
    fn test_copies_are_bit_identical() {
        let identity = OwnerIdentity::from_bytes(LOCAL_SYSTEM);
        let copy = identity;
        assert_eq!(identity, copy);
        assert_eq!(identity.as_bytes(), copy.as_bytes());
    }

    #[test]
    fn test_serde_round_trip() {
        let identity = OwnerIdentity::from_bytes(LOCAL_SYSTEM);
        let json = serde_json::to_string(&identity).unwrap();
        let back: OwnerIdentity = serde_json::from_str(&json).unwrap();
        assert_eq!(identity, back);
    }

    #[test]
    fn test_identifier_authority_big_endian() {
        let mut raw = [0u8; OwnerIdentity::LEN];
        raw[2..8].copy_from_slice(&[0, 0, 0, 0, 1, 0]);
        let identity = OwnerIdentity::from_bytes(raw);
        assert_eq!(identity.identifier_authority(), 256);
    }
}
