//! Datagram Transport
//!
//! The socket seam of the exchange engine.

use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use crate::config::Config;
use crate::error::{Result, TokenError};

/// A connected datagram endpoint
pub trait Transport {
    /// Send one datagram to the peer
    fn send(&mut self, datagram: &[u8]) -> io::Result<usize>;

    /// Receive one datagram into `buf`, blocking up to the transport's timeout
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Whether an I/O error is a receive timeout
///
/// Unix reports `WouldBlock`, Windows reports `TimedOut`.
pub fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
    )
}

/// UDP socket connected to the token server
#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,

    /// Server address, for logging
    peer_addr: SocketAddr,
}

impl UdpTransport {
    /// Resolve the server, bind a socket of the matching family and connect it
    pub fn connect(config: &Config) -> Result<Self> {
        config.validate()?;

        let peer_addr = resolve(&config.server_host, config.server_port)?;
        let local_addr: SocketAddr = match peer_addr {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };

        let socket = UdpSocket::bind(local_addr)?;
        socket.set_read_timeout(Some(config.recv_timeout))?;
        socket.connect(peer_addr)?;

        let transport = Self { socket, peer_addr };
        transport.log_connected()?;
        Ok(transport)
    }

    /// Wrap an already connected socket
    pub fn from_socket(socket: UdpSocket, recv_timeout: Duration) -> Result<Self> {
        socket.set_read_timeout(Some(recv_timeout))?;
        let peer_addr = socket.peer_addr()?;
        let transport = Self { socket, peer_addr };
        transport.log_connected()?;
        Ok(transport)
    }

    fn log_connected(&self) -> Result<()> {
        tracing::debug!(
            "UDP socket {} connected to {}",
            self.socket.local_addr()?,
            self.peer_addr
        );
        Ok(())
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, datagram: &[u8]) -> io::Result<usize> {
        self.socket.send(datagram)
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.socket.recv(buf)
    }
}

/// Resolve `host:port`, taking the first address returned
///
/// The address family of the result picks IPv4 or IPv6.
pub fn resolve(host: &str, port: u16) -> Result<SocketAddr> {
    (host, port)
        .to_socket_addrs()
        .map_err(|e| TokenError::Resolve(format!("{}: {}", host, e)))?
        .next()
        .ok_or_else(|| TokenError::Resolve(format!("{}: no addresses found", host)))
}
