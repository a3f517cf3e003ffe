//! The two wire shapes the sign accepts.
//!
//! Command frames are addressed, sequenced and checksummed (see
//! [`crate::command`]). Text frames are raw file writes with none of that
//! (see [`crate::text`]). They only meet here, as variants of one enum, so a
//! transport can send either without knowing which it got.

use bytes::Bytes;
use std::fmt;

/// A fully encoded frame, ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireFrame {
    /// Built by [`crate::CommandMessage::encode`].
    AddressedCommand(Bytes),
    /// Built by [`crate::TextFrame::encode`].
    Text(Bytes),
}

/// Discriminant of a [`WireFrame`], for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    AddressedCommand,
    Text,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::AddressedCommand => write!(f, "command"),
            FrameKind::Text => write!(f, "text"),
        }
    }
}

impl WireFrame {
    pub fn kind(&self) -> FrameKind {
        match self {
            WireFrame::AddressedCommand(_) => FrameKind::AddressedCommand,
            WireFrame::Text(_) => FrameKind::Text,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            WireFrame::AddressedCommand(bytes) | WireFrame::Text(bytes) => bytes,
        }
    }

    pub fn into_bytes(self) -> Bytes {
        match self {
            WireFrame::AddressedCommand(bytes) | WireFrame::Text(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl AsRef<[u8]> for WireFrame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
