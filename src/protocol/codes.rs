//! Message codes
//!
//! Request, response and server error codes, and the response sizes they imply.

use std::fmt;

use crate::error::{Result, TokenError};

/// Leading code of a server error response: `code(2) || error_id(1)`
pub const ERROR_RESPONSE_CODE: u16 = 256;

/// Width of the message code field
pub const CODE_SIZE: usize = 2;

/// Width of the member count field in group messages
pub const COUNT_SIZE: usize = 2;

/// Width of the padded id field
pub const ID_SIZE: usize = 12;

/// Width of the nonce field
pub const NONCE_SIZE: usize = 4;

/// Width of every token, individual or group
pub const TOKEN_SIZE: usize = 64;

/// One SAS on the wire without a leading code: id + nonce + token
pub const SAS_SIZE: usize = ID_SIZE + NONCE_SIZE + TOKEN_SIZE;

/// Width of the trailing status byte of validation responses
pub const STATUS_SIZE: usize = 1;

/// Request codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum RequestCode {
    IndividualTokenRequest = 1,
    IndividualTokenValidation = 3,
    GroupTokenRequest = 5,
    GroupTokenValidation = 7,
}

/// Response codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ResponseCode {
    IndividualTokenResponse = 2,
    IndividualTokenStatus = 4,
    GroupTokenResponse = 6,
    GroupTokenStatus = 8,
}

/// Error identifiers carried by an `ERROR_RESPONSE_CODE` reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ServerErrorCode {
    InvalidMessageCode = 1,
    IncorrectMessageLength = 2,
    InvalidParameter = 3,
    InvalidSingleToken = 4,
    AsciiDecodeError = 5,
}

impl RequestCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for RequestCode {
    type Error = TokenError;

    fn try_from(code: u16) -> Result<Self> {
        match code {
            1 => Ok(RequestCode::IndividualTokenRequest),
            3 => Ok(RequestCode::IndividualTokenValidation),
            5 => Ok(RequestCode::GroupTokenRequest),
            7 => Ok(RequestCode::GroupTokenValidation),
            _ => Err(TokenError::Protocol(format!("Unknown request code: {}", code))),
        }
    }
}

impl ResponseCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// The response kind the server answers a request kind with
    pub fn for_request(request: RequestCode) -> Self {
        match request {
            RequestCode::IndividualTokenRequest => ResponseCode::IndividualTokenResponse,
            RequestCode::IndividualTokenValidation => ResponseCode::IndividualTokenStatus,
            RequestCode::GroupTokenRequest => ResponseCode::GroupTokenResponse,
            RequestCode::GroupTokenValidation => ResponseCode::GroupTokenStatus,
        }
    }

    /// Whether the response size depends on a member count
    pub fn is_group(self) -> bool {
        matches!(
            self,
            ResponseCode::GroupTokenResponse | ResponseCode::GroupTokenStatus
        )
    }

    /// Whether the response ends in a status byte
    pub fn is_status(self) -> bool {
        matches!(
            self,
            ResponseCode::IndividualTokenStatus | ResponseCode::GroupTokenStatus
        )
    }
}

impl TryFrom<u16> for ResponseCode {
    type Error = TokenError;

    fn try_from(code: u16) -> Result<Self> {
        match code {
            2 => Ok(ResponseCode::IndividualTokenResponse),
            4 => Ok(ResponseCode::IndividualTokenStatus),
            6 => Ok(ResponseCode::GroupTokenResponse),
            8 => Ok(ResponseCode::GroupTokenStatus),
            _ => Err(TokenError::Protocol(format!("Unknown response code: {}", code))),
        }
    }
}

impl ServerErrorCode {
    pub fn name(self) -> &'static str {
        match self {
            ServerErrorCode::InvalidMessageCode => "INVALID_MESSAGE_CODE",
            ServerErrorCode::IncorrectMessageLength => "INCORRECT_MESSAGE_LENGTH",
            ServerErrorCode::InvalidParameter => "INVALID_PARAMETER",
            ServerErrorCode::InvalidSingleToken => "INVALID_SINGLE_TOKEN",
            ServerErrorCode::AsciiDecodeError => "ASCII_DECODE_ERROR",
        }
    }
}

impl fmt::Display for ServerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for ServerErrorCode {
    type Error = TokenError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(ServerErrorCode::InvalidMessageCode),
            2 => Ok(ServerErrorCode::IncorrectMessageLength),
            3 => Ok(ServerErrorCode::InvalidParameter),
            4 => Ok(ServerErrorCode::InvalidSingleToken),
            5 => Ok(ServerErrorCode::AsciiDecodeError),
            other => Err(TokenError::UnknownServerError(other)),
        }
    }
}

/// Exact number of bytes to read for a response kind
///
/// Group kinds need the member count `n`; individual kinds ignore it.
///
/// - individual response: `2 + 80` = 82
/// - individual status:   `2 + 80 + 1` = 83
/// - group response:      `4 + 80n + 64`
/// - group status:        `69 + 80n`
pub fn expected_response_size(kind: ResponseCode, n: Option<usize>) -> Result<usize> {
    let status = if kind.is_status() { STATUS_SIZE } else { 0 };
    if !kind.is_group() {
        return Ok(CODE_SIZE + SAS_SIZE + status);
    }

    let n = n.ok_or_else(|| {
        TokenError::InvalidInput(format!(
            "member count required to size a {:?} response",
            kind
        ))
    })?;
    Ok(CODE_SIZE + COUNT_SIZE + SAS_SIZE * n + TOKEN_SIZE + status)
}
