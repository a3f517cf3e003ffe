//! Time synchronization payload.
//!
//! Each clock field is written out in decimal and that text is read back as
//! hexadecimal: minute 59 goes on the wire as 0x59. For two-digit values this
//! is packed BCD. Years are sent modulo 1000, so from 2100 on the year field
//! no longer fits a byte and is left out of the frame by the command framer.
//! The conversion is kept exactly as the sign's reference tooling does it.

use crate::command::{Command, CommandMessage};
use crate::error::ProtocolError;
use chrono::{Datelike, NaiveDateTime, Timelike};

/// Fixed cell between the year and the month.
pub const YEAR_SEPARATOR: u16 = 32;

/// Trailing cells of every time sync.
pub const TRAILER: [u16; 2] = [2, 6];

/// Builds time sync messages.
pub struct ClockEncoder;

impl ClockEncoder {
    /// Payload cells for a wall-clock reading.
    pub fn cells(now: &NaiveDateTime) -> Result<[u16; 8], ProtocolError> {
        let year = now.year().rem_euclid(1000) as u32;
        Ok([
            decimal_as_hex(year)?,
            YEAR_SEPARATOR,
            decimal_as_hex(now.month())?,
            decimal_as_hex(now.day())?,
            decimal_as_hex(now.hour())?,
            decimal_as_hex(now.minute())?,
            TRAILER[0],
            TRAILER[1],
        ])
    }

    pub fn message(now: &NaiveDateTime) -> Result<CommandMessage, ProtocolError> {
        Ok(CommandMessage::new(Command::TIME_SYNC).with_cells(&Self::cells(now)?))
    }
}

/// Renders `value` in decimal and parses the digits as hexadecimal.
pub fn decimal_as_hex(value: u32) -> Result<u16, ProtocolError> {
    u16::from_str_radix(&value.to_string(), 16).map_err(|_| ProtocolError::ClockField { value })
}
