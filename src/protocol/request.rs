//! Request and reply definitions
//!
//! A `Request` is one command invocation, validated from its textual
//! arguments. A `Reply` is the decoded answer, printable as CLI output.

use std::fmt;

use bytes::Bytes;

use crate::error::{Result, TokenError};
use super::codec;
use super::codes::{expected_response_size, RequestCode, ResponseCode};
use super::token::{parse_nonce, validate_id, Gas, Sas};

/// Usage lines, one per command
pub const ITR_USAGE: &str = "Usage: itr <id> <nonce>";
pub const ITV_USAGE: &str = "Usage: itv <SAS>";
pub const GTR_USAGE: &str = "Usage: gtr <N> <SAS-1> <SAS-2> ... <SAS-N>";
pub const GTV_USAGE: &str = "Usage: gtv <GAS>";

/// A validated request, ready to encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Issue a token for an id (`itr`)
    IndividualToken { id: String, nonce: u32 },

    /// Validate one SAS (`itv`)
    IndividualValidation { sas: Sas },

    /// Issue a group token over several SAS (`gtr`)
    GroupToken { members: Vec<Sas> },

    /// Validate one GAS (`gtv`)
    GroupValidation { gas: Gas },
}

impl Request {
    /// `itr <id> <nonce>`
    pub fn individual_token(id: &str, nonce: &str) -> Result<Self> {
        validate_id(id)?;
        Ok(Request::IndividualToken {
            id: id.to_string(),
            nonce: parse_nonce(nonce)?,
        })
    }

    /// `itv <SAS>`
    pub fn individual_validation(sas: &str) -> Result<Self> {
        Ok(Request::IndividualValidation { sas: sas.parse()? })
    }

    /// `gtr <N> <SAS-1> ... <SAS-N>`
    ///
    /// Fails when the declared count does not match the SAS supplied.
    pub fn group_token<S: AsRef<str>>(n: &str, sas_list: &[S]) -> Result<Self> {
        let declared: usize = n.parse().map_err(|_| {
            TokenError::InvalidInput(format!("N must be a positive integer, got {:?}", n))
        })?;
        if declared == 0 {
            return Err(TokenError::InvalidInput(
                "N must be at least 1".to_string(),
            ));
        }
        if declared != sas_list.len() {
            return Err(TokenError::InvalidInput(format!(
                "declared {} SAS but {} were supplied",
                declared,
                sas_list.len()
            )));
        }

        let members = sas_list
            .iter()
            .map(|sas| sas.as_ref().parse::<Sas>())
            .collect::<Result<Vec<Sas>>>()?;
        Ok(Request::GroupToken { members })
    }

    /// `gtv <GAS>`
    pub fn group_validation(gas: &str) -> Result<Self> {
        Ok(Request::GroupValidation { gas: gas.parse()? })
    }

    /// Build a request from a command name and its arguments
    pub fn parse<S: AsRef<str>>(command: &str, args: &[S]) -> Result<Self> {
        match command {
            "itr" => {
                if args.len() != 2 {
                    return Err(TokenError::InvalidInput(ITR_USAGE.to_string()));
                }
                Request::individual_token(args[0].as_ref(), args[1].as_ref())
            }
            "itv" => {
                if args.len() != 1 {
                    return Err(TokenError::InvalidInput(ITV_USAGE.to_string()));
                }
                Request::individual_validation(args[0].as_ref())
            }
            "gtr" => {
                if args.len() < 2 {
                    return Err(TokenError::InvalidInput(GTR_USAGE.to_string()));
                }
                Request::group_token(args[0].as_ref(), &args[1..])
            }
            "gtv" => {
                if args.len() != 1 {
                    return Err(TokenError::InvalidInput(GTV_USAGE.to_string()));
                }
                Request::group_validation(args[0].as_ref())
            }
            other => Err(TokenError::InvalidInput(format!(
                "Invalid command: {:?}",
                other
            ))),
        }
    }

    /// Get the request code
    pub fn code(&self) -> RequestCode {
        match self {
            Request::IndividualToken { .. } => RequestCode::IndividualTokenRequest,
            Request::IndividualValidation { .. } => RequestCode::IndividualTokenValidation,
            Request::GroupToken { .. } => RequestCode::GroupTokenRequest,
            Request::GroupValidation { .. } => RequestCode::GroupTokenValidation,
        }
    }

    /// Get the response code the server should answer with
    pub fn expected_response(&self) -> ResponseCode {
        ResponseCode::for_request(self.code())
    }

    /// Member count for group requests
    pub fn member_count(&self) -> Option<usize> {
        match self {
            Request::GroupToken { members } => Some(members.len()),
            Request::GroupValidation { gas } => Some(gas.len()),
            _ => None,
        }
    }

    /// Exact size of the reply to this request
    pub fn expected_response_size(&self) -> Result<usize> {
        expected_response_size(self.expected_response(), self.member_count())
    }
}

/// Encode a request to its datagram
pub fn encode_request(request: &Request) -> Result<Bytes> {
    match request {
        Request::IndividualToken { id, nonce } => codec::encode_individual_request(id, *nonce),
        Request::IndividualValidation { sas } => codec::encode_individual_validation_request(sas),
        Request::GroupToken { members } => codec::encode_group_request(members.len(), members),
        Request::GroupValidation { gas } => codec::encode_group_validation_request(gas),
    }
}

/// A decoded reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Issued SAS (`itr`)
    Token(Sas),

    /// Validation status, zero when valid (`itv`, `gtv`)
    Status(u8),

    /// Issued GAS (`gtr`)
    GroupToken(Gas),
}

impl Reply {
    /// Whether a status reply reports a valid token
    pub fn is_valid(&self) -> Option<bool> {
        match self {
            Reply::Status(status) => Some(*status == 0),
            _ => None,
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Token(sas) => write!(f, "{}", sas),
            Reply::Status(status) => write!(f, "{}", status),
            Reply::GroupToken(gas) => write!(f, "{}", gas),
        }
    }
}

/// Decode the reply to `request`
///
/// The leading response code is expected to be verified already.
pub fn decode_reply(request: &Request, bytes: &[u8]) -> Result<Reply> {
    match request {
        Request::IndividualToken { .. } => {
            codec::decode_individual_response(bytes, true).map(Reply::Token)
        }
        Request::IndividualValidation { .. } => {
            codec::decode_individual_status(bytes).map(Reply::Status)
        }
        Request::GroupToken { .. } => codec::decode_group_response(bytes).map(Reply::GroupToken),
        Request::GroupValidation { gas } => {
            codec::decode_group_status(bytes, gas.len()).map(Reply::Status)
        }
    }
}
