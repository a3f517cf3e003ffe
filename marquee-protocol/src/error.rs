//! Protocol error types.

use std::fmt;
use thiserror::Error;

/// Which lookup table a name failed to resolve in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    MotionMode,
    Color,
    VerticalAlign,
    HorizontalAlign,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::MotionMode => write!(f, "motion mode"),
            AttributeKind::Color => write!(f, "color"),
            AttributeKind::VerticalAlign => write!(f, "vertical alignment"),
            AttributeKind::HorizontalAlign => write!(f, "horizontal alignment"),
        }
    }
}

/// Errors raised while encoding a frame. All of them surface before any
/// byte reaches the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("unknown {kind}: '{name}'")]
    InvalidAttribute { kind: AttributeKind, name: String },

    #[error("frame index {0} out of range (max {})", crate::MAX_FRAMES - 1)]
    OutOfRangeFrameIndex(u32),

    #[error("playlist must contain at least one frame")]
    EmptyPlaylist,

    #[error("playlist of {0} frames does not fit the 16-bit size field")]
    PlaylistTooLarge(u32),

    #[error("invalid drive {0:?}: must be a single ASCII character")]
    InvalidDrive(char),

    #[error("clock field {value} does not fit the sign's time encoding")]
    ClockField { value: u32 },
}

impl ProtocolError {
    pub(crate) fn invalid_attribute(kind: AttributeKind, name: &str) -> Self {
        ProtocolError::InvalidAttribute {
            kind,
            name: name.to_string(),
        }
    }
}
