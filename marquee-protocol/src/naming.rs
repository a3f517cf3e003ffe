//! Frame index to two-letter filename mapping.
//!
//! Frame `n` lives in file `[A + n/26, A + n%26]`: 0 is `AA`, 25 is `AZ`,
//! 26 is `BA` and 675 is `ZZ`. [`FileName::from_index`] does not enforce
//! that ceiling; indices from 676 upward produce bytes past `Z` (and wrap
//! modulo 256 eventually), exactly as the sign's own tooling does.
//! [`FileName::checked`] rejects them instead.

use crate::error::ProtocolError;
use crate::MAX_FRAMES;
use std::fmt;

/// Two-byte filename of a frame on the sign's drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileName(pub [u8; 2]);

impl FileName {
    /// Derives the filename for a frame index without validation.
    pub fn from_index(index: u32) -> Self {
        let first = u32::from(b'A').wrapping_add(index / 26) as u8;
        let second = b'A' + (index % 26) as u8;
        Self([first, second])
    }

    /// Derives the filename, rejecting indices past `ZZ`.
    pub fn checked(index: u32) -> Result<Self, ProtocolError> {
        if index >= MAX_FRAMES {
            return Err(ProtocolError::OutOfRangeFrameIndex(index));
        }
        Ok(Self::from_index(index))
    }

    /// Returns the filename as a pair of characters.
    pub fn chars(&self) -> (char, char) {
        (char::from(self.0[0]), char::from(self.0[1]))
    }

    pub fn as_bytes(&self) -> &[u8; 2] {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b) = self.chars();
        write!(f, "{}{}", a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_names() {
        assert_eq!(FileName::from_index(0).chars(), ('A', 'A'));
        assert_eq!(FileName::from_index(25).chars(), ('A', 'Z'));
        assert_eq!(FileName::from_index(26).chars(), ('B', 'A'));
        assert_eq!(FileName::from_index(27).chars(), ('B', 'B'));
        assert_eq!(FileName::from_index(675).chars(), ('Z', 'Z'));
        assert_eq!(FileName::from_index(27).to_string(), "BB");
    }

    #[test]
    fn test_past_ceiling_is_not_validated() {
        // 676 / 26 = 26 -> the byte after 'Z'
        assert_eq!(FileName::from_index(676).chars(), ('[', 'A'));
        assert!(FileName::checked(676).is_err());
        assert_eq!(FileName::checked(675), Ok(FileName(*b"ZZ")));
    }

    #[test]
    fn test_checked_error_carries_index() {
        assert_eq!(
            FileName::checked(1000),
            Err(ProtocolError::OutOfRangeFrameIndex(1000))
        );
    }

    #[test]
    fn test_injective_over_valid_range() {
        let names: HashSet<FileName> = (0..MAX_FRAMES).map(FileName::from_index).collect();
        assert_eq!(names.len(), MAX_FRAMES as usize);
    }

    proptest! {
        #[test]
        fn prop_valid_indices_are_uppercase(index in 0u32..MAX_FRAMES) {
            let (a, b) = FileName::from_index(index).chars();
            prop_assert!(a.is_ascii_uppercase());
            prop_assert!(b.is_ascii_uppercase());
        }
    }
}
