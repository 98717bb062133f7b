//! Tests for the UDP Transport
//!
//! Loopback sockets stand in for the token server.

use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokenwire::network::{resolve, Exchange, Transport, UdpTransport};
use tokenwire::protocol::ResponseCode;
use tokenwire::{Config, TokenError};

// =============================================================================
// Helper Functions
// =============================================================================

/// A server that counts datagrams and never answers
struct SilentServer {
    addr: SocketAddr,
    stop: Arc<AtomicBool>,
    handle: thread::JoinHandle<usize>,
}

impl SilentServer {
    fn start() -> Self {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket
            .set_read_timeout(Some(Duration::from_millis(20)))
            .unwrap();
        let addr = socket.local_addr().unwrap();
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            let mut received = 0;
            let mut buf = [0u8; 1024];
            while !stop_flag.load(Ordering::Relaxed) {
                if socket.recv_from(&mut buf).is_ok() {
                    received += 1;
                }
            }
            received
        });

        Self { addr, stop, handle }
    }

    /// Stop the server and return how many datagrams it saw
    fn finish(self) -> usize {
        // Let in-flight datagrams land
        thread::sleep(Duration::from_millis(50));
        self.stop.store(true, Ordering::Relaxed);
        self.handle.join().unwrap()
    }
}

fn config_for(addr: SocketAddr) -> Config {
    Config::builder()
        .server_host(addr.ip().to_string())
        .server_port(addr.port())
        .recv_timeout_ms(100)
        .max_attempts(3)
        .build()
}

// =============================================================================
// Resolution Tests
// =============================================================================

#[test]
fn test_resolve_ipv4_literal() {
    let addr = resolve("127.0.0.1", 51001).unwrap();
    assert!(addr.is_ipv4());
    assert_eq!(addr.port(), 51001);
}

#[test]
fn test_resolve_ipv6_literal() {
    let addr = resolve("2804:1f4a:dcc:ff03::1", 51001).unwrap();
    assert!(addr.is_ipv6());
}

#[test]
fn test_resolve_invalid_host() {
    let result = resolve("not a host name", 1);
    assert!(matches!(result, Err(TokenError::Resolve(_))));
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_connect_rejects_bad_config() {
    let zero_attempts = Config::builder().max_attempts(0).build();
    assert!(matches!(
        UdpTransport::connect(&zero_attempts),
        Err(TokenError::Config(_))
    ));

    let zero_timeout = Config::builder().recv_timeout_ms(0).build();
    assert!(matches!(
        UdpTransport::connect(&zero_timeout),
        Err(TokenError::Config(_))
    ));

    let no_host = Config::builder().server_host("").build();
    assert!(matches!(
        UdpTransport::connect(&no_host),
        Err(TokenError::Config(_))
    ));
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.recv_timeout, Duration::from_secs(5));
    assert_eq!(config.max_attempts, 3);
    assert!(config.validate().is_ok());
}

// =============================================================================
// Loopback Tests
// =============================================================================

#[test]
fn test_silent_server_receives_three_sends() {
    let server = SilentServer::start();
    let exchange = Exchange::connect(&config_for(server.addr)).unwrap();

    let result = exchange.execute(&[0x00, 0x01], ResponseCode::IndividualTokenResponse, 82);

    assert!(matches!(result, Err(TokenError::RetriesExhausted { attempts: 3 })));
    assert_eq!(server.finish(), 3);
}

#[test]
fn test_udp_round_trip() {
    let server = UdpSocket::bind("127.0.0.1:0").unwrap();
    let addr = server.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let mut buf = [0u8; 128];
        let (n, peer) = server.recv_from(&mut buf).unwrap();
        let mut reply = buf[..n].to_vec();
        reply[1] = 0x04;
        reply.push(0);
        server.send_to(&reply, peer).unwrap();
    });

    let mut transport = UdpTransport::connect(&config_for(addr)).unwrap();
    assert_eq!(transport.peer_addr(), addr);

    let request = [0x00, 0x03, 0x10, 0x20];
    transport.send(&request).unwrap();

    let mut buf = [0u8; 16];
    let n = transport.recv(&mut buf).unwrap();
    assert_eq!(&buf[..n], &[0x00, 0x04, 0x10, 0x20, 0x00]);

    handle.join().unwrap();
}

#[test]
fn test_from_socket() {
    let peer = UdpSocket::bind("127.0.0.1:0").unwrap();
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.connect(peer.local_addr().unwrap()).unwrap();

    let transport = UdpTransport::from_socket(socket, Duration::from_millis(50)).unwrap();
    assert_eq!(transport.peer_addr(), peer.local_addr().unwrap());
    let exchange = Exchange::new(transport, 2);

    let result = exchange.execute(&[0x00, 0x01], ResponseCode::IndividualTokenResponse, 82);
    assert!(matches!(result, Err(TokenError::RetriesExhausted { attempts: 2 })));
}
