//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol. Pure: no I/O.
//!
//! ## Wire Format
//!
//! All integers are big-endian. A SAS block is always 80 bytes:
//!
//! ```text
//! ┌──────────────┬───────────┬──────────────────────────────┐
//! │ Id (12, pad) │ Nonce (4) │          Token (64)          │
//! └──────────────┴───────────┴──────────────────────────────┘
//! ```
//!
//! ### Individual Messages
//! ```text
//! request:    ┌ Code (2) ┬ Id (12) ┬ Nonce (4) ┐
//! response:   ┌ Code (2) ┬ SAS block (80) ┐
//! validation: ┌ Code (2) ┬ SAS block (80) ┐
//! status:     ┌ Code (2) ┬ SAS block (80) ┬ Status (1) ┐
//! ```
//!
//! ### Group Messages
//! ```text
//! request:    ┌ Code (2) ┬ N (2) ┬ N × SAS block ┐
//! response:   ┌ Code (2) ┬ N (2) ┬ N × SAS block ┬ Group token (64) ┐
//! validation: ┌ Code (2) ┬ N (2) ┬ N × SAS block ┬ Group token (64) ┐
//! status:     ┌ Code (2) ┬ N (2) ┬ N × SAS block ┬ Group token (64) ┬ Status (1) ┐
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, TokenError};
use super::codes::{
    expected_response_size, RequestCode, ResponseCode, CODE_SIZE, COUNT_SIZE, ID_SIZE,
    NONCE_SIZE, SAS_SIZE, TOKEN_SIZE,
};
use super::token::{validate_id, Gas, Sas, Token};

/// Padding byte for the id field
const ID_PAD: u8 = b' ';

// =============================================================================
// SAS Block Helpers
// =============================================================================

/// Write an id right-padded with spaces to 12 bytes
fn put_id(buf: &mut BytesMut, id: &str) -> Result<()> {
    validate_id(id)?;
    buf.put_slice(id.as_bytes());
    buf.put_bytes(ID_PAD, ID_SIZE - id.len());
    Ok(())
}

/// Write one 80-byte SAS block (no code)
fn put_sas(buf: &mut BytesMut, sas: &Sas) -> Result<()> {
    put_id(buf, sas.id())?;
    buf.put_u32(sas.nonce());
    buf.put_slice(sas.token().as_bytes());
    Ok(())
}

/// Read one 80-byte SAS block (no code)
fn get_sas(buf: &mut &[u8]) -> Result<Sas> {
    if buf.remaining() < SAS_SIZE {
        return Err(TokenError::Decode(format!(
            "Incomplete SAS block: expected {} bytes, got {}",
            SAS_SIZE,
            buf.remaining()
        )));
    }

    let raw_id = &buf[..ID_SIZE];
    if !raw_id.is_ascii() {
        return Err(TokenError::Decode("SAS id is not ASCII".to_string()));
    }
    let id = String::from_utf8_lossy(raw_id).trim_end_matches(' ').to_string();
    buf.advance(ID_SIZE);

    let nonce = buf.get_u32();

    let token = Token::from_wire(&buf[..TOKEN_SIZE])?;
    buf.advance(TOKEN_SIZE);

    Sas::new(id, nonce, token).map_err(|e| TokenError::Decode(e.to_string()))
}

/// Fail unless `bytes` is exactly `expected` long
fn check_len(what: &str, bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(TokenError::Decode(format!(
            "{}: expected {} bytes, got {}",
            what,
            expected,
            bytes.len()
        )));
    }
    Ok(())
}

fn check_code(what: &str, code: u16, expected: ResponseCode) -> Result<()> {
    if code != expected.as_u16() {
        return Err(TokenError::Decode(format!(
            "{}: invalid code {} (expected {})",
            what,
            code,
            expected.as_u16()
        )));
    }
    Ok(())
}

fn group_count(n: usize) -> Result<u16> {
    if n == 0 {
        return Err(TokenError::InvalidInput(
            "group needs at least one SAS".to_string(),
        ));
    }
    u16::try_from(n).map_err(|_| {
        TokenError::InvalidInput(format!("group of {} SAS exceeds {}", n, u16::MAX))
    })
}

// =============================================================================
// Individual Messages
// =============================================================================

/// Encode an individual token request
///
/// Format: code (2) + id (12, space-padded) + nonce (4)
pub fn encode_individual_request(id: &str, nonce: u32) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(CODE_SIZE + ID_SIZE + NONCE_SIZE);
    buf.put_u16(RequestCode::IndividualTokenRequest.as_u16());
    put_id(&mut buf, id)?;
    buf.put_u32(nonce);
    Ok(buf.freeze())
}

/// Decode an individual token response into a SAS
///
/// With `code_included` the input starts with the 2-byte response code,
/// otherwise it is a bare 80-byte SAS block.
pub fn decode_individual_response(bytes: &[u8], code_included: bool) -> Result<Sas> {
    let mut buf = bytes;
    if code_included {
        check_len("Individual token response", bytes, CODE_SIZE + SAS_SIZE)?;
        check_code(
            "Individual token response",
            buf.get_u16(),
            ResponseCode::IndividualTokenResponse,
        )?;
    } else {
        check_len("SAS block", bytes, SAS_SIZE)?;
    }
    get_sas(&mut buf)
}

/// Encode an individual token validation request
///
/// Format: code (2) + id (12) + nonce (4) + token (64)
pub fn encode_individual_validation_request(sas: &Sas) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(CODE_SIZE + SAS_SIZE);
    buf.put_u16(RequestCode::IndividualTokenValidation.as_u16());
    put_sas(&mut buf, sas)?;
    Ok(buf.freeze())
}

/// Extract the status byte of an individual validation response
///
/// Zero means valid; any other value means rejected.
pub fn decode_individual_status(bytes: &[u8]) -> Result<u8> {
    let expected = expected_response_size(ResponseCode::IndividualTokenStatus, None)?;
    check_len("Individual token status", bytes, expected)?;
    Ok(bytes[expected - 1])
}

// =============================================================================
// Group Messages
// =============================================================================

/// Encode a group token request
///
/// Format: code (2) + n (2) + n × SAS block (80)
pub fn encode_group_request(n: usize, sas_list: &[Sas]) -> Result<Bytes> {
    if n != sas_list.len() {
        return Err(TokenError::InvalidInput(format!(
            "declared {} SAS but {} were supplied",
            n,
            sas_list.len()
        )));
    }
    let count = group_count(n)?;

    let mut buf = BytesMut::with_capacity(CODE_SIZE + COUNT_SIZE + SAS_SIZE * n);
    buf.put_u16(RequestCode::GroupTokenRequest.as_u16());
    buf.put_u16(count);
    for sas in sas_list {
        put_sas(&mut buf, sas)?;
    }
    Ok(buf.freeze())
}

/// Decode a group token response into a GAS
pub fn decode_group_response(bytes: &[u8]) -> Result<Gas> {
    let header = CODE_SIZE + COUNT_SIZE;
    if bytes.len() < header {
        return Err(TokenError::Decode(format!(
            "Incomplete group token response header: expected {} bytes, got {}",
            header,
            bytes.len()
        )));
    }

    let mut buf = bytes;
    check_code(
        "Group token response",
        buf.get_u16(),
        ResponseCode::GroupTokenResponse,
    )?;
    let n = buf.get_u16() as usize;
    if n == 0 {
        return Err(TokenError::Decode(
            "Group token response carries no SAS".to_string(),
        ));
    }

    let expected = expected_response_size(ResponseCode::GroupTokenResponse, Some(n))?;
    check_len("Group token response", bytes, expected)?;

    let mut members = Vec::with_capacity(n);
    for _ in 0..n {
        members.push(get_sas(&mut buf)?);
    }
    let token = Token::from_wire(&buf[..TOKEN_SIZE])?;

    Gas::new(members, token).map_err(|e| TokenError::Decode(e.to_string()))
}

/// Encode a group token validation request
///
/// Format: code (2) + n (2) + n × SAS block (80) + group token (64)
pub fn encode_group_validation_request(gas: &Gas) -> Result<Bytes> {
    let count = group_count(gas.len())?;

    let mut buf =
        BytesMut::with_capacity(CODE_SIZE + COUNT_SIZE + SAS_SIZE * gas.len() + TOKEN_SIZE);
    buf.put_u16(RequestCode::GroupTokenValidation.as_u16());
    buf.put_u16(count);
    for sas in gas.members() {
        put_sas(&mut buf, sas)?;
    }
    buf.put_slice(gas.token().as_bytes());
    Ok(buf.freeze())
}

/// Extract the status byte of a group validation response for `n` members
pub fn decode_group_status(bytes: &[u8], n: usize) -> Result<u8> {
    let expected = expected_response_size(ResponseCode::GroupTokenStatus, Some(n))?;
    check_len("Group token status", bytes, expected)?;
    Ok(bytes[expected - 1])
}

// =============================================================================
// Status Echo
// =============================================================================

/// Whether a status response echoes the body of the validation request
///
/// A status response is the request with a new code and one status byte
/// appended, so everything between the code and the status must match.
pub fn status_echoes_request(request: &[u8], response: &[u8]) -> bool {
    request.len() >= CODE_SIZE
        && response.len() == request.len() + 1
        && response[CODE_SIZE..request.len()] == request[CODE_SIZE..]
}
