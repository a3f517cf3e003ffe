//! # marquee-client
//!
//! Drives a marquee LED sign.
//!
//! This crate provides:
//! - The [`Transmit`] seam and its UDP, hex-dump and in-memory transports
//! - [`SignController`], one method per sign operation, built on
//!   `marquee-protocol`

pub mod controller;
pub mod error;
pub mod transport;

pub use controller::SignController;
pub use error::ClientError;
pub use transport::{DumpTransport, MemoryTransport, Transmit, UdpConfig, UdpTransport};
