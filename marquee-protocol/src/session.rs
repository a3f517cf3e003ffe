//! Per-sign session state.

use crate::error::ProtocolError;

/// Drive used when none is configured.
pub const DEFAULT_DRIVE: u8 = b'E';

/// Default group and unit address on the command bus.
pub const DEFAULT_ADDR: u8 = 1;

/// First sequence number of a fresh session.
pub const INITIAL_SEQUENCE: u16 = 1;

/// Addressing and sequencing state for one sign.
///
/// Only command frames consume sequence numbers; text frames read the drive
/// and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    drive: u8,
    group_addr: u8,
    unit_addr: u8,
    sequence: u16,
}

impl Session {
    pub fn new(group_addr: u8, unit_addr: u8) -> Self {
        Self {
            drive: DEFAULT_DRIVE,
            group_addr,
            unit_addr,
            sequence: INITIAL_SEQUENCE,
        }
    }

    /// Sets the drive letter. It must be a single ASCII character.
    pub fn with_drive(mut self, drive: char) -> Result<Self, ProtocolError> {
        self.drive = parse_drive(drive)?;
        Ok(self)
    }

    /// Starts the counter at `sequence` instead of 1.
    pub fn with_sequence(mut self, sequence: u16) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn drive(&self) -> u8 {
        self.drive
    }

    pub fn group_addr(&self) -> u8 {
        self.group_addr
    }

    pub fn unit_addr(&self) -> u8 {
        self.unit_addr
    }

    /// Sequence number the next command frame will carry.
    pub fn sequence(&self) -> u16 {
        self.sequence
    }

    /// Returns the current sequence number and advances the counter.
    pub(crate) fn next_sequence(&mut self) -> u16 {
        let current = self.sequence;
        self.sequence = self.sequence.wrapping_add(1);
        current
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_ADDR, DEFAULT_ADDR)
    }
}

/// Validates a drive letter.
pub fn parse_drive(drive: char) -> Result<u8, ProtocolError> {
    if drive.is_ascii() {
        Ok(drive as u8)
    } else {
        Err(ProtocolError::InvalidDrive(drive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let session = Session::default();
        assert_eq!(session.drive(), b'E');
        assert_eq!(session.group_addr(), 1);
        assert_eq!(session.unit_addr(), 1);
        assert_eq!(session.sequence(), 1);
    }

    #[test]
    fn test_next_sequence_returns_pre_increment_value() {
        let mut session = Session::default();
        assert_eq!(session.next_sequence(), 1);
        assert_eq!(session.next_sequence(), 2);
        assert_eq!(session.sequence(), 3);
    }

    #[test]
    fn test_sequence_wraps() {
        let mut session = Session::default().with_sequence(u16::MAX);
        assert_eq!(session.next_sequence(), u16::MAX);
        assert_eq!(session.sequence(), 0);
    }

    #[test]
    fn test_drive_validation() {
        let session = Session::new(2, 3).with_drive('D').unwrap();
        assert_eq!(session.drive(), b'D');
        assert_eq!(session.group_addr(), 2);
        assert_eq!(session.unit_addr(), 3);

        assert_eq!(
            Session::default().with_drive('Ω'),
            Err(ProtocolError::InvalidDrive('Ω'))
        );
    }
}
