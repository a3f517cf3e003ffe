//! # marquee-protocol
//!
//! Wire codec for networked marquee LED signs.
//!
//! This crate provides:
//! - Inline markup translation to the sign's control sequences
//! - Addressed command frames with sequence numbers and 16-bit checksums
//! - Direct text-file frames carrying display attributes
//! - Playlist (`SEQUENT.SYS`), configuration and time-sync payloads
//!
//! Nothing here performs I/O. Every encoder returns bytes (or a
//! [`WireFrame`]) for a transport to send.

pub mod clock;
pub mod command;
pub mod error;
pub mod frame;
pub mod markup;
pub mod naming;
pub mod playlist;
pub mod session;
pub mod settings;
pub mod tables;
pub mod text;

pub use clock::{decimal_as_hex, ClockEncoder};
pub use command::{checksum, checksum_matches, Command, CommandMessage, COMMAND_HEADER_SIZE, MAGIC};
pub use error::{AttributeKind, ProtocolError};
pub use frame::{FrameKind, WireFrame};
pub use markup::MarkupCodec;
pub use naming::FileName;
pub use playlist::PlaylistEncoder;
pub use session::{parse_drive, Session};
pub use settings::ConfigEncoder;
pub use tables::{Color, HorizontalAlign, MotionMode, VerticalAlign};
pub use text::{DisplayAttributes, TextFrame};

/// Number of distinct two-letter file names, and so of addressable frames.
pub const MAX_FRAMES: u32 = 26 * 26;

/// UDP port the sign listens on.
pub const DEFAULT_PORT: u16 = 8887;
