//! Direct text-file writes.
//!
//! A text frame overwrites one playlist file with display attributes and
//! already-encoded markup. It bypasses the command envelope: no checksum, no
//! sequence number, no bus address.
//!
//! ```text
//! 00 00 00 00 00                 preamble
//! 01 'Z' '0' '0' 02 'A' 0F       job header
//! drive 'T' name0 name1 06       write text file
//! 0A 'I' motion_in
//! 0A 'O' motion_out
//! 0E "20004"
//! 1B '0' typeset                 0x62 / 0x61
//! 08 '1'
//! 1F vertical_align
//! 1E horizontal_align
//! 0F speed
//! 1C color
//! 1D background
//! 1A '1'
//! 07 flash                       0x31 / 0x30
//! text...
//! 04                             terminator
//! ```

use crate::frame::WireFrame;
use crate::naming::FileName;
use crate::session::Session;
use crate::tables::{Color, HorizontalAlign, MotionMode, VerticalAlign};
use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};

/// Leading zero bytes of every text frame.
pub const PREAMBLE: [u8; 5] = [0; 5];

/// Fixed job header.
pub const JOB_HEADER: &[u8] = b"\x01Z00\x02A\x0f";

/// Opcode for writing a text file.
pub const WRITE_TEXT: u8 = b'T';

/// Ends the text file.
pub const TERMINATOR: u8 = 0x04;

/// Highest speed level that is translated to a digit byte.
pub const MAX_SPEED_LEVEL: u8 = 6;

/// Bytes around the attributes, excluding the text.
const FRAME_OVERHEAD: usize = 49;

/// How one frame is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayAttributes {
    pub move_in: MotionMode,
    pub move_out: MotionMode,
    pub color: Color,
    pub background: Color,
    pub flash: bool,
    /// Speed level 0..=6, or a raw pre-encoded speed byte above that.
    pub speed: u8,
    pub vert_align: VerticalAlign,
    pub horiz_align: HorizontalAlign,
    /// Proportional spacing.
    pub typeset: bool,
}

impl Default for DisplayAttributes {
    fn default() -> Self {
        Self {
            move_in: MotionMode::Random,
            move_out: MotionMode::Random,
            color: Color::Red,
            background: Color::Black,
            flash: false,
            speed: 2,
            vert_align: VerticalAlign::Center,
            horiz_align: HorizontalAlign::Center,
            typeset: true,
        }
    }
}

impl DisplayAttributes {
    /// Speed as sent on the wire.
    ///
    /// Levels up to 6 become ASCII digits. Anything higher is assumed to be
    /// a raw speed byte already and is sent unchanged.
    pub fn speed_byte(&self) -> u8 {
        if self.speed <= MAX_SPEED_LEVEL {
            self.speed + b'0'
        } else {
            self.speed
        }
    }

    fn typeset_byte(&self) -> u8 {
        if self.typeset {
            0x62
        } else {
            0x61
        }
    }

    fn flash_byte(&self) -> u8 {
        if self.flash {
            b'1'
        } else {
            b'0'
        }
    }
}

/// A text file write for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFrame {
    pub drive: u8,
    pub file: FileName,
    pub attributes: DisplayAttributes,
    /// Output of [`crate::MarkupCodec::encode`].
    pub text: Bytes,
}

impl TextFrame {
    /// Prepares a write of `text` to the file backing frame `index`.
    ///
    /// Reads the drive from the session but leaves its sequence alone.
    pub fn new(
        session: &Session,
        index: u32,
        attributes: DisplayAttributes,
        text: impl Into<Bytes>,
    ) -> Self {
        Self {
            drive: session.drive(),
            file: FileName::from_index(index),
            attributes,
            text: text.into(),
        }
    }

    pub fn encode(&self) -> WireFrame {
        let attrs = &self.attributes;
        let mut buf = BytesMut::with_capacity(FRAME_OVERHEAD + self.text.len());

        buf.put_slice(&PREAMBLE);
        buf.put_slice(JOB_HEADER);
        buf.put_u8(self.drive);
        buf.put_u8(WRITE_TEXT);
        buf.put_slice(self.file.as_bytes());
        buf.put_u8(0x06);

        buf.put_slice(&[0x0a, b'I', attrs.move_in.code()]);
        buf.put_slice(&[0x0a, b'O', attrs.move_out.code()]);
        buf.put_slice(b"\x0e20004");
        buf.put_slice(&[0x1b, b'0', attrs.typeset_byte()]);
        buf.put_slice(&[0x08, b'1']);
        buf.put_slice(&[0x1f, attrs.vert_align.code()]);
        buf.put_slice(&[0x1e, attrs.horiz_align.code()]);
        buf.put_slice(&[0x0f, attrs.speed_byte()]);
        buf.put_slice(&[0x1c, attrs.color.code()]);
        buf.put_slice(&[0x1d, attrs.background.code()]);
        buf.put_slice(&[0x1a, b'1']);
        buf.put_slice(&[0x07, attrs.flash_byte()]);

        buf.put_slice(&self.text);
        buf.put_u8(TERMINATOR);

        WireFrame::Text(buf.freeze())
    }
}
