//! Client error types.

use marquee_protocol::ProtocolError;
use thiserror::Error;

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Encoding failed; nothing was sent.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The transport refused a frame. Frames before it were delivered.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),
}

impl ClientError {
    /// Returns whether the error came from the transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}
