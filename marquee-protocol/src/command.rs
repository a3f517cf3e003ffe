//! Addressed, checksummed command frames.
//!
//! Frame layout (16 bytes header + payload, integers little-endian):
//!
//! ```text
//! +--------+----------+----------+----------+-------+------+----------+---------+-------------+
//! | magic  | checksum | length   | reserved | group | unit | sequence | command | is_response |
//! | 2 bytes| 2 bytes  | 2 bytes  | 2 bytes  | 1 byte|1 byte| 2 bytes  | 3 bytes | 1 byte      |
//! +--------+----------+----------+----------+-------+------+----------+---------+-------------+
//! | payload                                                                                    |
//! +--------------------------------------------------------------------------------------------+
//! ```
//!
//! The checksum is the 16-bit wrapping sum of every byte from `length`
//! to the end of the payload. `length` is whatever the command declares,
//! not the payload size; most commands declare 0.

use crate::frame::WireFrame;
use crate::session::Session;
use bytes::{BufMut, Bytes, BytesMut};
use std::fmt;
use std::ops::Range;

/// Magic prefix of every command frame: 'U', 0xA7.
pub const MAGIC: [u8; 2] = [0x55, 0xa7];

/// Size of the fixed command header in bytes.
pub const COMMAND_HEADER_SIZE: usize = 16;

/// Where the checksum is stored.
pub const CHECKSUM_RANGE: Range<usize> = 2..4;

/// First byte covered by the checksum.
pub const CHECKSUM_START: usize = 4;

pub const LENGTH_RANGE: Range<usize> = 4..6;
pub const GROUP_OFFSET: usize = 8;
pub const UNIT_OFFSET: usize = 9;
pub const SEQUENCE_RANGE: Range<usize> = 10..12;
pub const COMMAND_RANGE: Range<usize> = 12..15;

/// Three-byte command code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command(pub u8, pub u8, pub u8);

impl Command {
    pub const RESET: Command = Command(4, 0, 0);
    pub const PAUSE: Command = Command(4, 1, 0);
    pub const RESUME: Command = Command(4, 2, 0);
    /// Leaves the sign's built-in test pattern.
    pub const TEST_RESET: Command = Command(3, 9, 0);
    pub const TIME_SYNC: Command = Command(5, 2, 2);
    /// Uploads a system file such as `CONFIG.SYS` or `SEQUENT.SYS`.
    pub const WRITE_SYSTEM_FILE: Command = Command(2, 2, 6);
    pub const RESET_DEFAULTS: Command = Command(7, 13, 1);
    pub const SET_DEFAULTS: Command = Command(2, 12, 0);
    /// First half of a file deletion.
    pub const DELETE_FILE: Command = Command(7, 6, 2);
    /// Second half of a file deletion.
    pub const DELETE_FILE_FINISH: Command = Command(7, 6, 4);

    pub fn to_bytes(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{})", self.0, self.1, self.2)
    }
}

/// A command waiting to be framed.
///
/// Framing consumes one sequence number from the session, so each message
/// should be encoded exactly once, right before it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMessage {
    pub command: Command,
    pub declared_length: u16,
    pub payload: Bytes,
}

impl CommandMessage {
    /// Creates a message with an empty payload and a declared length of 0.
    pub fn new(command: Command) -> Self {
        Self {
            command,
            declared_length: 0,
            payload: Bytes::new(),
        }
    }

    pub fn with_payload(mut self, payload: impl Into<Bytes>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Sets the payload from 16-bit cells. Cells that do not fit a byte are
    /// left out of the frame entirely.
    pub fn with_cells(mut self, cells: &[u16]) -> Self {
        let bytes: Vec<u8> = cells
            .iter()
            .filter_map(|&cell| u8::try_from(cell).ok())
            .collect();
        self.payload = Bytes::from(bytes);
        self
    }

    pub fn with_length(mut self, declared_length: u16) -> Self {
        self.declared_length = declared_length;
        self
    }

    /// Frames the message, consuming the session's next sequence number.
    pub fn encode(&self, session: &mut Session) -> WireFrame {
        let sequence = session.next_sequence();
        let mut buf = BytesMut::with_capacity(COMMAND_HEADER_SIZE + self.payload.len());

        buf.put_slice(&MAGIC);
        // Checksum placeholder, filled in below
        buf.put_u16_le(0);
        buf.put_u16_le(self.declared_length);
        buf.put_u16_le(0);
        buf.put_u8(session.group_addr());
        buf.put_u8(session.unit_addr());
        buf.put_u16_le(sequence);
        buf.put_slice(&self.command.to_bytes());
        // is_response
        buf.put_u8(0);
        buf.put_slice(&self.payload);

        let sum = checksum(&buf[CHECKSUM_START..]);
        buf[CHECKSUM_RANGE].copy_from_slice(&sum.to_le_bytes());

        WireFrame::AddressedCommand(buf.freeze())
    }
}

/// 16-bit wrapping byte sum.
pub fn checksum(bytes: &[u8]) -> u16 {
    bytes
        .iter()
        .fold(0u16, |acc, &b| acc.wrapping_add(u16::from(b)))
}

/// Returns whether a framed command carries a valid checksum.
pub fn checksum_matches(frame: &[u8]) -> bool {
    if frame.len() < COMMAND_HEADER_SIZE || frame[..2] != MAGIC {
        return false;
    }
    let stored = u16::from_le_bytes([frame[2], frame[3]]);
    stored == checksum(&frame[CHECKSUM_START..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_test_reset_header() {
        let mut session = Session::default();
        let frame = CommandMessage::new(Command::TEST_RESET).encode(&mut session);
        let bytes = frame.as_bytes();

        assert_eq!(bytes.len(), COMMAND_HEADER_SIZE);
        assert_eq!(&bytes[..2], &MAGIC);
        assert_eq!(&bytes[4..], &[0, 0, 0, 0, 1, 1, 1, 0, 3, 9, 0, 0]);
        // group + unit + sequence + command bytes: 1 + 1 + 1 + 3 + 9
        assert_eq!(&bytes[CHECKSUM_RANGE], &[15, 0]);
        assert!(checksum_matches(bytes));
    }

    #[test]
    fn test_sequence_consumed_per_frame() {
        let mut session = Session::default();
        let first = CommandMessage::new(Command::PAUSE).encode(&mut session);
        let second = CommandMessage::new(Command::PAUSE).encode(&mut session);

        assert_eq!(&first.as_bytes()[SEQUENCE_RANGE], &[1, 0]);
        assert_eq!(&second.as_bytes()[SEQUENCE_RANGE], &[2, 0]);
        assert_eq!(session.sequence(), 3);
    }

    #[test]
    fn test_sequence_little_endian() {
        let mut session = Session::default().with_sequence(0x1234);
        let frame = CommandMessage::new(Command::RESET).encode(&mut session);
        assert_eq!(&frame.as_bytes()[SEQUENCE_RANGE], &[0x34, 0x12]);
    }

    #[test]
    fn test_addresses_and_length() {
        let mut session = Session::new(7, 9);
        let frame = CommandMessage::new(Command::SET_DEFAULTS)
            .with_payload(vec![0xaa; 16])
            .with_length(0x0102)
            .encode(&mut session);
        let bytes = frame.as_bytes();

        assert_eq!(&bytes[LENGTH_RANGE], &[0x02, 0x01]);
        assert_eq!(bytes[GROUP_OFFSET], 7);
        assert_eq!(bytes[UNIT_OFFSET], 9);
        assert_eq!(&bytes[COMMAND_RANGE], &[2, 12, 0]);
        assert_eq!(bytes.len(), COMMAND_HEADER_SIZE + 16);
    }

    #[test]
    fn test_wide_cells_dropped() {
        let message = CommandMessage::new(Command::TIME_SYNC).with_cells(&[0x26, 0x999, 0x100, 6]);
        assert_eq!(&message.payload[..], &[0x26, 6]);
    }

    #[test]
    fn test_checksum_wraps() {
        let mut session = Session::default();
        let frame = CommandMessage::new(Command::WRITE_SYSTEM_FILE)
            .with_payload(vec![0xff; 300])
            .encode(&mut session);
        let expected = (0xff * 300 + 1 + 1 + 1 + 2 + 2 + 6) % 65536;
        let bytes = frame.as_bytes();
        assert_eq!(u16::from_le_bytes([bytes[2], bytes[3]]), expected as u16);
        assert!(checksum_matches(bytes));
    }

    #[test]
    fn test_checksum_mismatch_detected() {
        let mut session = Session::default();
        let frame = CommandMessage::new(Command::RESUME).encode(&mut session);
        let mut bytes = frame.as_bytes().to_vec();
        bytes[GROUP_OFFSET] ^= 0xff;
        assert!(!checksum_matches(&bytes));
        assert!(!checksum_matches(&bytes[..4]));
    }

    #[test]
    fn test_command_display() {
        assert_eq!(Command::RESET_DEFAULTS.to_string(), "(7,13,1)");
    }

    proptest! {
        #[test]
        fn prop_checksum_covers_header_and_payload(
            payload in proptest::collection::vec(any::<u8>(), 0..512),
            group in any::<u8>(),
            unit in any::<u8>(),
            sequence in any::<u16>(),
            length in any::<u16>(),
        ) {
            let mut session = Session::new(group, unit).with_sequence(sequence);
            let frame = CommandMessage::new(Command::DELETE_FILE)
                .with_payload(payload)
                .with_length(length)
                .encode(&mut session);
            let bytes = frame.as_bytes();
            let sum: u32 = bytes[4..].iter().map(|&b| u32::from(b)).sum();
            prop_assert_eq!(sum % 65536, u32::from(bytes[2]) + 256 * u32::from(bytes[3]));
        }

        #[test]
        fn prop_sequence_advances_once_per_frame(start in any::<u16>(), n in 0usize..600) {
            let mut session = Session::default().with_sequence(start);
            for _ in 0..n {
                CommandMessage::new(Command::PAUSE).encode(&mut session);
            }
            prop_assert_eq!(session.sequence(), start.wrapping_add(n as u16));
        }
    }
}
