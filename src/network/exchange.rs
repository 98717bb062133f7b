//! Exchange Engine
//!
//! Runs one request/response exchange over a datagram transport.
//!
//! ## States
//! ```text
//!  Idle ──send──▶ Sent ──reply──▶ Succeeded
//!                  │  ▲
//!          timeout │  │ re-send
//!                  ▼  │
//!                Retrying ──attempts exhausted──▶ Failed
//! ```

use bytes::Bytes;

use crate::config::Config;
use crate::error::{Result, TokenError};
use crate::protocol::{ResponseCode, ServerErrorCode, CODE_SIZE, ERROR_RESPONSE_CODE};
use super::transport::{is_timeout, Transport, UdpTransport};

/// Where an exchange currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    /// Connected, nothing sent yet
    Idle,

    /// Request written, waiting for the reply
    Sent,

    /// Last receive timed out; the request will be re-sent
    Retrying,

    /// A reply arrived
    Succeeded,

    /// Attempts exhausted or the transport failed
    Failed,
}

/// One request/response exchange
///
/// Owns its transport; `execute` consumes the exchange so the socket is
/// closed on every exit path.
pub struct Exchange<T: Transport = UdpTransport> {
    transport: T,

    /// Total number of sends allowed
    max_attempts: u32,

    /// Sends performed so far
    attempts: u32,

    state: ExchangeState,
}

impl Exchange<UdpTransport> {
    /// Open a UDP exchange against the configured server
    pub fn connect(config: &Config) -> Result<Self> {
        let transport = UdpTransport::connect(config)?;
        Ok(Exchange::new(transport, config.max_attempts))
    }
}

impl<T: Transport> Exchange<T> {
    pub fn new(transport: T, max_attempts: u32) -> Self {
        Self {
            transport,
            max_attempts,
            attempts: 0,
            state: ExchangeState::Idle,
        }
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Send `request` and return the verified reply
    ///
    /// Reads at most `expected_size` bytes. The reply's leading code must be
    /// `expected`; an error-sentinel reply becomes a server error.
    pub fn execute(
        mut self,
        request: &[u8],
        expected: ResponseCode,
        expected_size: usize,
    ) -> Result<Bytes> {
        let reply = self.send_and_receive(request, expected_size)?;
        verify_response_code(&reply, expected)?;
        Ok(reply)
    }

    /// Send `request` until a reply arrives or attempts run out
    ///
    /// Short replies are returned as-is; decoding rejects them later.
    pub fn send_and_receive(&mut self, request: &[u8], expected_size: usize) -> Result<Bytes> {
        let mut buf = vec![0u8; expected_size];

        while self.attempts < self.max_attempts {
            self.attempts += 1;

            if let Err(e) = self.transport.send(request) {
                self.state = ExchangeState::Failed;
                return Err(e.into());
            }
            self.state = ExchangeState::Sent;
            tracing::debug!(
                "Sent {} bytes (attempt {} of {})",
                request.len(),
                self.attempts,
                self.max_attempts
            );

            match self.transport.recv(&mut buf) {
                Ok(n) => {
                    self.state = ExchangeState::Succeeded;
                    tracing::debug!("Received {} bytes (expected {})", n, expected_size);
                    buf.truncate(n);
                    return Ok(Bytes::from(buf));
                }
                Err(ref e) if is_timeout(e) => {
                    self.state = ExchangeState::Retrying;
                    tracing::warn!(
                        "Timed out. Attempt {} of {}",
                        self.attempts,
                        self.max_attempts
                    );
                }
                Err(e) => {
                    self.state = ExchangeState::Failed;
                    return Err(e.into());
                }
            }
        }

        self.state = ExchangeState::Failed;
        Err(TokenError::RetriesExhausted {
            attempts: self.attempts,
        })
    }
}

/// Check the leading code of a reply
///
/// - `expected`: the reply goes on to the codec
/// - `ERROR_RESPONSE_CODE`: the next byte names the server error
/// - anything else: protocol violation
pub fn verify_response_code(reply: &[u8], expected: ResponseCode) -> Result<()> {
    if reply.len() < CODE_SIZE {
        return Err(TokenError::Decode(format!(
            "Invalid response: {} bytes is too short for a response code",
            reply.len()
        )));
    }

    let code = u16::from_be_bytes([reply[0], reply[1]]);
    if code == expected.as_u16() {
        return Ok(());
    }

    if code == ERROR_RESPONSE_CODE {
        let error_id = reply.get(CODE_SIZE).copied().ok_or_else(|| {
            TokenError::Protocol("Error response carries no error code".to_string())
        })?;
        return Err(match ServerErrorCode::try_from(error_id) {
            Ok(kind) => TokenError::Server(kind),
            Err(e) => e,
        });
    }

    Err(TokenError::Protocol(format!(
        "Invalid response code: {} (expected {})",
        code,
        expected.as_u16()
    )))
}
