//! `SEQUENT.SYS` playlist uploads.
//!
//! The playlist tells the sign which text files to cycle through. Uploading
//! it reallocates the sign's file table, so it has to be sent before any text
//! frame writes to an index outside the previous playlist.
//!
//! ```text
//! +---------------+--------+-------------+-----------------+--------------------+
//! | "SEQUENT.SYS" | size   | sub-header  | playlist header | entries            |
//! | + NUL (12)    | 2 (LE) | 10          | 8               | 36 * frame_count   |
//! +---------------+--------+-------------+-----------------+--------------------+
//! ```
//!
//! `size` counts everything after the first 24 bytes, which is also what the
//! command envelope declares as its length.

use crate::command::{Command, CommandMessage};
use crate::error::ProtocolError;
use crate::naming::FileName;
use crate::session::Session;
use bytes::{BufMut, BytesMut};

/// Playlist control file name, NUL terminated.
pub const PLAYLIST_FILE: &[u8; 12] = b"SEQUENT.SYS\0";

/// Bytes between the size field and the playlist header.
pub const SUB_HEADER: [u8; 10] = [0x00, 0x00, 0x00, 0x03, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00];

/// Playlist header; the frame count goes at [`COUNT_OFFSET`].
pub const PLAYLIST_HEADER: [u8; 8] = [0x53, 0x51, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00];
pub const COUNT_OFFSET: usize = 4;

/// Bytes preceding the counted section.
pub const FILE_HEADER_SIZE: usize = 24;

/// Size of one playlist entry.
pub const ENTRY_SIZE: usize = 36;

/// Playlist entry template.
pub const ENTRY_TEMPLATE: [u8; ENTRY_SIZE] = [
    0x00, 0x54, 0x0f, 0x7f, 0x08, 0x20, 0x08, 0x19, 0x01, 0x01, 0x01, 0x01, //
    0x08, 0x20, 0x08, 0x19, 0x01, 0x01, 0x01, 0x01, 0xb0, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
];
pub const ENTRY_DRIVE_OFFSET: usize = 0;
pub const ENTRY_NAME_OFFSET: usize = 24;

/// Builds playlist uploads.
pub struct PlaylistEncoder;

impl PlaylistEncoder {
    /// Value of the size field (and declared length) for `frame_count` frames.
    pub fn counted_size(frame_count: u32) -> Result<u16, ProtocolError> {
        (PLAYLIST_HEADER.len() as u32)
            .checked_add(
                (ENTRY_SIZE as u32)
                    .checked_mul(frame_count)
                    .ok_or(ProtocolError::PlaylistTooLarge(frame_count))?,
            )
            .and_then(|size| u16::try_from(size).ok())
            .ok_or(ProtocolError::PlaylistTooLarge(frame_count))
    }

    /// Builds the `SEQUENT.SYS` payload for frames `0..frame_count`.
    pub fn build(session: &Session, frame_count: u32) -> Result<BytesMut, ProtocolError> {
        if frame_count == 0 {
            return Err(ProtocolError::EmptyPlaylist);
        }
        let size = Self::counted_size(frame_count)?;
        let count = u16::try_from(frame_count)
            .map_err(|_| ProtocolError::PlaylistTooLarge(frame_count))?;

        let mut buf = BytesMut::with_capacity(FILE_HEADER_SIZE + usize::from(size));
        buf.put_slice(PLAYLIST_FILE);
        buf.put_u16_le(size);
        buf.put_slice(&SUB_HEADER);

        let mut header = PLAYLIST_HEADER;
        header[COUNT_OFFSET..COUNT_OFFSET + 2].copy_from_slice(&count.to_le_bytes());
        buf.put_slice(&header);

        for index in 0..frame_count {
            let mut entry = ENTRY_TEMPLATE;
            entry[ENTRY_DRIVE_OFFSET] = session.drive();
            entry[ENTRY_NAME_OFFSET..ENTRY_NAME_OFFSET + 2]
                .copy_from_slice(FileName::from_index(index).as_bytes());
            buf.put_slice(&entry);
        }

        Ok(buf)
    }

    /// Wraps the playlist in its upload command.
    pub fn message(session: &Session, frame_count: u32) -> Result<CommandMessage, ProtocolError> {
        let payload = Self::build(session, frame_count)?;
        let declared_length = (payload.len() - FILE_HEADER_SIZE) as u16;
        Ok(CommandMessage::new(Command::WRITE_SYSTEM_FILE)
            .with_payload(payload)
            .with_length(declared_length))
    }
}
