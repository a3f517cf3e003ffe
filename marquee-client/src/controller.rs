//! High-level sign API.

use crate::error::ClientError;
use crate::transport::Transmit;
use chrono::{Local, NaiveDateTime};
use marquee_protocol::{
    ClockEncoder, Command, CommandMessage, ConfigEncoder, DisplayAttributes, FileName,
    MarkupCodec, PlaylistEncoder, ProtocolError, Session, TextFrame, WireFrame, MAX_FRAMES,
};

/// Drives one sign through a transport.
///
/// Every operation encodes all of its frames first and only then hands them
/// to the transport, so an encoding error never leaves a half-sent sequence
/// behind. Frames are transmitted in the order the operations are called.
pub struct SignController<T: Transmit> {
    transport: T,
    session: Session,
}

impl<T: Transmit> SignController<T> {
    pub fn new(transport: T, session: Session) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    // =========================================================================
    // Helper methods
    // =========================================================================

    fn send_commands(&mut self, messages: &[CommandMessage]) -> Result<(), ClientError> {
        let frames: Vec<WireFrame> = messages
            .iter()
            .map(|message| message.encode(&mut self.session))
            .collect();
        self.send_frames(&frames)
    }

    fn send_frames(&mut self, frames: &[WireFrame]) -> Result<(), ClientError> {
        for frame in frames {
            tracing::trace!(
                "-> {} frame ({} bytes): {}",
                frame.kind(),
                frame.len(),
                hex::encode(frame.as_bytes())
            );
            self.transport.transmit(frame.as_bytes())?;
        }
        Ok(())
    }

    fn simple(&mut self, name: &str, command: Command) -> Result<(), ClientError> {
        tracing::debug!("{} {} seq={}", name, command, self.session.sequence());
        self.send_commands(&[CommandMessage::new(command)])
    }

    // =========================================================================
    // Display control
    // =========================================================================

    /// Restarts the sign.
    pub fn reset(&mut self) -> Result<(), ClientError> {
        self.simple("reset", Command::RESET)
    }

    /// Leaves the built-in test pattern.
    pub fn test_reset(&mut self) -> Result<(), ClientError> {
        self.simple("test_reset", Command::TEST_RESET)
    }

    /// Freezes the display while files are rewritten.
    pub fn pause(&mut self) -> Result<(), ClientError> {
        self.simple("pause", Command::PAUSE)
    }

    pub fn resume(&mut self) -> Result<(), ClientError> {
        self.simple("resume", Command::RESUME)
    }

    // =========================================================================
    // Clock and settings
    // =========================================================================

    /// Sets the sign's clock to local time.
    pub fn time_sync(&mut self) -> Result<(), ClientError> {
        self.time_sync_at(&Local::now().naive_local())
    }

    /// Sets the sign's clock to `now`.
    pub fn time_sync_at(&mut self, now: &NaiveDateTime) -> Result<(), ClientError> {
        let message = ClockEncoder::message(now)?;
        tracing::debug!("time_sync {} seq={}", now, self.session.sequence());
        self.send_commands(&[message])
    }

    /// Re-uploads `CONFIG.SYS` and the factory defaults for the drive.
    pub fn redo_settings(&mut self) -> Result<(), ClientError> {
        let messages = ConfigEncoder::messages(&self.session);
        tracing::debug!(
            "redo_settings drive={} seq={}",
            char::from(self.session.drive()),
            self.session.sequence()
        );
        self.send_commands(&messages)
    }

    // =========================================================================
    // Playlist and files
    // =========================================================================

    /// Replaces the playlist with frames `0..count`.
    pub fn set_frame_count(&mut self, count: u32) -> Result<(), ClientError> {
        if count > MAX_FRAMES {
            return Err(ProtocolError::OutOfRangeFrameIndex(count - 1).into());
        }
        let message = PlaylistEncoder::message(&self.session, count)?;
        tracing::debug!("set_frame_count {} seq={}", count, self.session.sequence());
        self.send_commands(&[message])
    }

    /// Writes `text` (with markup) to frame `index`.
    ///
    /// Text frames carry no sequence number; the session counter is untouched.
    pub fn set_text(
        &mut self,
        index: u32,
        text: &str,
        attributes: &DisplayAttributes,
    ) -> Result<(), ClientError> {
        let file = FileName::checked(index)?;
        let encoded = MarkupCodec::encode(text);
        let frame = TextFrame::new(&self.session, index, *attributes, encoded.freeze());
        tracing::debug!("set_text {} ({}): {:?}", index, file, text);
        self.send_frames(&[frame.encode()])
    }

    /// Deletes a file on the sign. Sends two commands, one sequence number each.
    pub fn delete_file(&mut self, path: &str) -> Result<(), ClientError> {
        let messages = [
            CommandMessage::new(Command::DELETE_FILE).with_payload(path.as_bytes().to_vec()),
            CommandMessage::new(Command::DELETE_FILE_FINISH).with_payload(path.as_bytes().to_vec()),
        ];
        tracing::debug!("delete_file {:?} seq={}", path, self.session.sequence());
        self.send_commands(&messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MemoryTransport;
    use chrono::NaiveDate;
    use marquee_protocol::{checksum_matches, Color, MotionMode};

    fn controller() -> SignController<MemoryTransport> {
        SignController::new(MemoryTransport::new(), Session::default())
    }

    fn sequence_of(frame: &[u8]) -> u16 {
        u16::from_le_bytes([frame[10], frame[11]])
    }

    #[test]
    fn test_simple_commands() {
        let mut sign = controller();
        sign.reset().unwrap();
        sign.test_reset().unwrap();
        sign.pause().unwrap();
        sign.resume().unwrap();

        let frames = sign.transport().frames();
        let commands: Vec<&[u8]> = frames.iter().map(|f| &f[12..15]).collect();
        assert_eq!(
            commands,
            vec![&[4u8, 0, 0][..], &[3, 9, 0][..], &[4, 1, 0][..], &[4, 2, 0][..]]
        );
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.len(), 16);
            assert_eq!(sequence_of(frame), i as u16 + 1);
            assert!(checksum_matches(frame));
        }
        assert_eq!(sign.session().sequence(), 5);
    }

    #[test]
    fn test_test_reset_bytes() {
        let mut sign = controller();
        sign.test_reset().unwrap();
        assert_eq!(
            sign.transport().frames()[0],
            vec![0x55, 0xa7, 15, 0, 0, 0, 0, 0, 1, 1, 1, 0, 3, 9, 0, 0]
        );
    }

    #[test]
    fn test_time_sync_at() {
        let mut sign = controller();
        let now = NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap();
        sign.time_sync_at(&now).unwrap();

        let frame = &sign.transport().frames()[0];
        assert_eq!(&frame[12..15], &[5, 2, 2]);
        assert_eq!(&frame[4..6], &[0, 0]);
        assert_eq!(&frame[16..], &[0x26, 32, 0x10, 0x18, 0x14, 0x05, 2, 6]);
    }

    #[test]
    fn test_time_sync_uses_local_clock() {
        let mut sign = controller();
        sign.time_sync().unwrap();
        let frame = &sign.transport().frames()[0];
        assert_eq!(frame[17], 32);
        assert_eq!(&frame[frame.len() - 2..], &[2, 6]);
    }

    #[test]
    fn test_redo_settings_sends_three_frames_in_order() {
        let mut sign = controller();
        sign.redo_settings().unwrap();

        let frames = sign.transport().frames();
        assert_eq!(frames.len(), 3);
        assert_eq!(&frames[0][12..15], &[2, 2, 6]);
        assert_eq!(&frames[0][4..6], &[0x87, 0]);
        assert_eq!(&frames[0][16..26], b"CONFIG.SYS");
        assert_eq!(&frames[1][12..15], &[7, 13, 1]);
        assert_eq!(&frames[1][16..], &[b'E', 0x3a, 0, 0]);
        assert_eq!(&frames[2][12..15], &[2, 12, 0]);
        assert_eq!(&frames[2][4..6], &[16, 0]);
        assert_eq!(
            frames.iter().map(|f| sequence_of(f)).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_set_frame_count() {
        let mut sign = controller();
        sign.set_frame_count(3).unwrap();

        let frame = &sign.transport().frames()[0];
        assert_eq!(&frame[4..6], &[116, 0]);
        assert_eq!(&frame[16..28], b"SEQUENT.SYS\0");
        assert_eq!(frame.len(), 16 + 24 + 116);
        assert!(checksum_matches(frame));
    }

    #[test]
    fn test_set_frame_count_limits() {
        let mut sign = controller();
        assert!(matches!(
            sign.set_frame_count(0),
            Err(ClientError::Protocol(ProtocolError::EmptyPlaylist))
        ));
        assert!(matches!(
            sign.set_frame_count(677),
            Err(ClientError::Protocol(ProtocolError::OutOfRangeFrameIndex(676)))
        ));
        sign.set_frame_count(676).unwrap();
        assert_eq!(sign.transport().frames().len(), 1);
        // Rejected calls consumed no sequence numbers
        assert_eq!(sign.session().sequence(), 2);
    }

    #[test]
    fn test_set_text_leaves_sequence_alone() {
        let mut sign = controller();
        let attrs = DisplayAttributes {
            move_in: MotionMode::ScrollLeft,
            color: Color::Green,
            ..DisplayAttributes::default()
        };
        sign.set_text(27, "{y}OH HAI", &attrs).unwrap();

        let frame = &sign.transport().frames()[0];
        assert_eq!(&frame[..5], &[0; 5]);
        assert_eq!(&frame[12..17], b"ETBB\x06");
        assert_eq!(&frame[17..20], &[0x0a, b'I', 0x33]);
        assert!(frame.ends_with(b"\x1c\x33OH HAI\x04"));
        assert_eq!(sign.session().sequence(), 1);
    }

    #[test]
    fn test_set_text_rejects_out_of_range_index() {
        let mut sign = controller();
        let err = sign
            .set_text(676, "nope", &DisplayAttributes::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::Protocol(ProtocolError::OutOfRangeFrameIndex(676))
        ));
        assert!(sign.transport().frames().is_empty());
    }

    #[test]
    fn test_delete_file_sends_two_sequenced_frames() {
        let mut sign = controller();
        sign.delete_file("E:AB").unwrap();

        let frames = sign.transport().frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(&frames[0][12..15], &[7, 6, 2]);
        assert_eq!(&frames[1][12..15], &[7, 6, 4]);
        assert_eq!(&frames[0][16..], b"E:AB");
        assert_eq!(&frames[1][16..], b"E:AB");
        assert_eq!(sequence_of(&frames[0]), 1);
        assert_eq!(sequence_of(&frames[1]), 2);
    }

    #[test]
    fn test_transport_error_passes_through() {
        let mut sign = SignController::new(MemoryTransport::failing_after(1), Session::default());
        let err = sign.redo_settings().unwrap_err();
        assert!(err.is_transport());
        assert_eq!(sign.transport().frames().len(), 1);
        // All three frames were framed before sending started
        assert_eq!(sign.session().sequence(), 4);
    }

    #[test]
    fn test_custom_session() {
        let session = Session::new(3, 4).with_drive('D').unwrap().with_sequence(100);
        let mut sign = SignController::new(MemoryTransport::new(), session);
        sign.pause().unwrap();
        sign.set_text(0, "hi", &DisplayAttributes::default()).unwrap();

        let frames = sign.into_transport().take();
        assert_eq!(frames[0][8], 3);
        assert_eq!(frames[0][9], 4);
        assert_eq!(sequence_of(&frames[0]), 100);
        assert_eq!(&frames[1][12..14], b"DT");
    }
}
