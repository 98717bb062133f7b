//! Protocol Module
//!
//! Defines the wire protocol spoken with the token server.
//!
//! ## Message Format
//!
//! Every message starts with a 2-byte big-endian code. Group messages follow
//! it with a 2-byte member count.
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Code (2) │ [N (2)]  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Request Codes
//! - 1: ITR - individual token request
//! - 3: ITV - individual token validation
//! - 5: GTR - group token request
//! - 7: GTV - group token validation
//!
//! ### Response Codes
//! - 2: individual token response
//! - 4: individual token status
//! - 6: group token response
//! - 8: group token status
//! - 256: server error, followed by a 1-byte error identifier

mod codes;
mod token;
mod request;
pub mod codec;

pub use codes::{
    expected_response_size, RequestCode, ResponseCode, ServerErrorCode, CODE_SIZE, COUNT_SIZE,
    ERROR_RESPONSE_CODE, ID_SIZE, NONCE_SIZE, SAS_SIZE, STATUS_SIZE, TOKEN_SIZE,
};
pub use token::{parse_nonce, validate_id, Gas, Sas, Token};
pub use request::{
    decode_reply, encode_request, Reply, Request, GTR_USAGE, GTV_USAGE, ITR_USAGE, ITV_USAGE,
};
pub use codec::{
    decode_group_response, decode_group_status, decode_individual_response,
    decode_individual_status, encode_group_request, encode_group_validation_request,
    encode_individual_request, encode_individual_validation_request, status_echoes_request,
};
