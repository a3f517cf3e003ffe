//! Frame transports.
//!
//! The controller hands each encoded frame to a [`Transmit`] implementation
//! exactly once, in order, and never retries. Delivery, pacing and address
//! resolution live here.

use marquee_protocol::DEFAULT_PORT;
use std::io::{self, Write};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

/// Delay after each datagram. The sign drops frames that arrive faster.
pub const DEFAULT_PACE: Duration = Duration::from_millis(300);

/// Sends one encoded frame to the sign.
pub trait Transmit {
    fn transmit(&mut self, frame: &[u8]) -> io::Result<()>;
}

impl<T: Transmit + ?Sized> Transmit for Box<T> {
    fn transmit(&mut self, frame: &[u8]) -> io::Result<()> {
        (**self).transmit(frame)
    }
}

impl<T: Transmit + ?Sized> Transmit for &mut T {
    fn transmit(&mut self, frame: &[u8]) -> io::Result<()> {
        (**self).transmit(frame)
    }
}

// =========================================================================
// UDP
// =========================================================================

/// UDP transport configuration.
#[derive(Debug, Clone)]
pub struct UdpConfig {
    /// Sign host name or IP address.
    pub host: String,
    pub port: u16,
    /// Sleep after every datagram.
    pub pace: Duration,
    /// Local address to bind; an ephemeral port on the wildcard address if unset.
    pub bind_addr: Option<SocketAddr>,
}

impl UdpConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            pace: DEFAULT_PACE,
            bind_addr: None,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = Some(addr);
        self
    }

    /// Resolves the sign address, taking the first result.
    pub fn resolve(&self) -> io::Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no address found for {}", self.host),
                )
            })
    }
}

/// Connected UDP socket, one datagram per frame.
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    peer: SocketAddr,
    pace: Duration,
}

impl UdpTransport {
    pub fn connect(config: &UdpConfig) -> io::Result<Self> {
        let peer = config.resolve()?;
        let bind_addr = config.bind_addr.unwrap_or_else(|| {
            if peer.is_ipv4() {
                SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
            } else {
                SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
            }
        });

        let socket = UdpSocket::bind(bind_addr)?;
        socket.connect(peer)?;
        tracing::info!("Connected to sign at {} (pace {:?})", peer, config.pace);

        Ok(Self {
            socket,
            peer,
            pace: config.pace,
        })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}

impl Transmit for UdpTransport {
    fn transmit(&mut self, frame: &[u8]) -> io::Result<()> {
        let sent = self.socket.send(frame)?;
        if sent != frame.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short datagram: {} of {} bytes", sent, frame.len()),
            ));
        }
        if !self.pace.is_zero() {
            std::thread::sleep(self.pace);
        }
        Ok(())
    }
}

// =========================================================================
// Offline transports
// =========================================================================

/// Writes each frame as one line of lowercase hex.
#[derive(Debug)]
pub struct DumpTransport<W: Write> {
    out: W,
}

impl<W: Write> DumpTransport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Transmit for DumpTransport<W> {
    fn transmit(&mut self, frame: &[u8]) -> io::Result<()> {
        writeln!(self.out, "{}", hex::encode(frame))?;
        self.out.flush()
    }
}

/// Records frames in memory.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    frames: Vec<Vec<u8>>,
    fail_after: Option<usize>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `count` frames, then fails every later transmit.
    pub fn failing_after(count: usize) -> Self {
        Self {
            frames: Vec::new(),
            fail_after: Some(count),
        }
    }

    pub fn frames(&self) -> &[Vec<u8>] {
        &self.frames
    }

    /// Returns the recorded frames and clears the log.
    pub fn take(&mut self) -> Vec<Vec<u8>> {
        std::mem::take(&mut self.frames)
    }
}

impl Transmit for MemoryTransport {
    fn transmit(&mut self, frame: &[u8]) -> io::Result<()> {
        if self.fail_after.is_some_and(|limit| self.frames.len() >= limit) {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "memory transport closed",
            ));
        }
        self.frames.push(frame.to_vec());
        Ok(())
    }
}
