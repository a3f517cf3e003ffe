//! Device configuration and factory-default payloads.
//!
//! These are byte-for-byte copies of what the sign's own setup tool sends.
//! Only the drive letter is substituted, at the offsets named below.

use crate::command::{Command, CommandMessage};
use crate::session::Session;
use bytes::Bytes;

/// `CONFIG.SYS` upload. Contains no drive-dependent bytes.
pub const CONFIG_SYS: [u8; 159] = [
    0x43, 0x4f, 0x4e, 0x46, 0x49, 0x47, 0x2e, 0x53, 0x59, 0x53, 0x00, 0x00, //
    0x87, 0x00, 0x00, 0x00, 0x00, 0x03, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, //
    0xaa, 0x55, 0x50, 0x00, 0x07, 0x00, 0x00, 0x00, 0x03, 0x00, 0x03, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x08, 0x00, 0x04, 0x0a, //
    0x07, 0x00, 0x28, 0x01, 0x00, 0x00, 0x00, 0x41, 0x01, 0x01, 0xf0, 0xf0, //
    0x02, 0x02, 0xa8, 0xc0, 0x00, 0x1d, 0x6f, 0x00, 0x00, 0x55, 0x03, 0x00, //
    0x07, 0x97, 0x05, 0x52, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x06, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x01, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x0b, 0x30, 0x30, 0x30, 0x30, 0x30, 0x30, 0x30, 0x30, 0x30, 0x30, //
    0x30, 0x00, 0x5f, 0xf9, 0xde, 0x4a, 0x95, 0x61, 0xe3, 0x40, 0x07, 0x44, //
    0x49, 0x53, 0x50, 0x4c, 0x41, 0x59, 0x00, 0x00, 0x00, 0x80, 0x00, 0x0a, //
    0x00, 0x20, 0x00, 0x3f, 0x00, 0x5d, 0x00, 0x75, 0x00, 0xa0, 0x00, 0xba, //
    0x00, 0xd0, 0x00, //
];
pub const CONFIG_SYS_LENGTH: u16 = 0x87;

/// Factory-default reset for one drive.
pub const RESET_DEFAULTS: [u8; 4] = [0x00, 0x3a, 0x00, 0x00];
pub const RESET_DEFAULTS_DRIVE_OFFSET: usize = 0;

/// Default settings block; the drive appears twice.
pub const SET_DEFAULTS: [u8; 16] = [
    0xaa, 0x55, 0x00, 0x01, 0x00, 0x30, 0x31, 0x00, //
    0x00, 0x01, 0x31, 0x2f, 0x2f, 0x33, 0x06, 0x01, //
];
pub const SET_DEFAULTS_DRIVE_OFFSETS: [usize; 2] = [2, 4];
pub const SET_DEFAULTS_LENGTH: u16 = 16;

/// Builds the configuration messages sent by a settings refresh.
pub struct ConfigEncoder;

impl ConfigEncoder {
    pub fn config_sys() -> CommandMessage {
        CommandMessage::new(Command::WRITE_SYSTEM_FILE)
            .with_payload(Bytes::from_static(&CONFIG_SYS))
            .with_length(CONFIG_SYS_LENGTH)
    }

    pub fn reset_defaults(session: &Session) -> CommandMessage {
        let mut payload = RESET_DEFAULTS;
        payload[RESET_DEFAULTS_DRIVE_OFFSET] = session.drive();
        CommandMessage::new(Command::RESET_DEFAULTS).with_payload(payload.to_vec())
    }

    pub fn set_defaults(session: &Session) -> CommandMessage {
        let mut payload = SET_DEFAULTS;
        for offset in SET_DEFAULTS_DRIVE_OFFSETS {
            payload[offset] = session.drive();
        }
        CommandMessage::new(Command::SET_DEFAULTS)
            .with_payload(payload.to_vec())
            .with_length(SET_DEFAULTS_LENGTH)
    }

    /// All three messages, in the order the sign expects them.
    pub fn messages(session: &Session) -> [CommandMessage; 3] {
        [
            Self::config_sys(),
            Self::reset_defaults(session),
            Self::set_defaults(session),
        ]
    }
}
