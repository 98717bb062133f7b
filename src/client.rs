//! Client Module
//!
//! Dispatches one request per call through a fresh exchange.
//!
//! ## Flow
//! 1. Encode the request (caller errors surface here, before any I/O)
//! 2. Open an exchange against the configured server
//! 3. Send, await and verify the reply
//! 4. Decode the reply

use crate::config::Config;
use crate::error::{Result, TokenError};
use crate::network::{Exchange, Transport};
use bytes::Bytes;

use crate::protocol::{
    decode_reply, encode_request, status_echoes_request, Gas, Reply, Request, Sas,
};

/// Token server client
#[derive(Debug, Clone)]
pub struct Client {
    config: Config,
}

impl Client {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run `request` over a new UDP exchange
    pub fn execute(&self, request: &Request) -> Result<Reply> {
        self.config.validate()?;
        let datagram = encode_request(request)?;

        let exchange = Exchange::connect(&self.config)?;
        Self::run(exchange, request, datagram)
    }

    /// Run `request` over a caller-supplied exchange
    pub fn execute_with<T: Transport>(exchange: Exchange<T>, request: &Request) -> Result<Reply> {
        let datagram = encode_request(request)?;
        Self::run(exchange, request, datagram)
    }

    fn run<T: Transport>(exchange: Exchange<T>, request: &Request, datagram: Bytes) -> Result<Reply> {
        let expected = request.expected_response();
        let expected_size = request.expected_response_size()?;

        tracing::debug!(
            "{:?}: {} byte request, expecting {} byte {:?}",
            request.code(),
            datagram.len(),
            expected_size,
            expected
        );

        let response = exchange.execute(&datagram, expected, expected_size)?;
        let reply = decode_reply(request, &response)?;

        if matches!(reply, Reply::Status(_)) && !status_echoes_request(&datagram, &response) {
            tracing::warn!("Status response does not echo the validated token");
        }

        Ok(reply)
    }

    /// Issue an individual token
    pub fn request_token(&self, id: &str, nonce: u32) -> Result<Sas> {
        let request = Request::IndividualToken {
            id: id.to_string(),
            nonce,
        };
        match self.execute(&request)? {
            Reply::Token(sas) => Ok(sas),
            other => Err(unexpected_reply(&request, &other)),
        }
    }

    /// Validate an individual token; returns the status byte
    pub fn validate_token(&self, sas: &Sas) -> Result<u8> {
        let request = Request::IndividualValidation { sas: sas.clone() };
        match self.execute(&request)? {
            Reply::Status(status) => Ok(status),
            other => Err(unexpected_reply(&request, &other)),
        }
    }

    /// Issue a group token over `members`, in order
    pub fn request_group_token(&self, members: &[Sas]) -> Result<Gas> {
        let request = Request::GroupToken {
            members: members.to_vec(),
        };
        match self.execute(&request)? {
            Reply::GroupToken(gas) => Ok(gas),
            other => Err(unexpected_reply(&request, &other)),
        }
    }

    /// Validate a group token; returns the status byte
    pub fn validate_group_token(&self, gas: &Gas) -> Result<u8> {
        let request = Request::GroupValidation { gas: gas.clone() };
        match self.execute(&request)? {
            Reply::Status(status) => Ok(status),
            other => Err(unexpected_reply(&request, &other)),
        }
    }
}

fn unexpected_reply(request: &Request, reply: &Reply) -> TokenError {
    TokenError::Protocol(format!(
        "{:?} answered with an unexpected reply: {:?}",
        request.code(),
        reply
    ))
}
