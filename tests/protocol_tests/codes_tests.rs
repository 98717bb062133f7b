//! Code and Size Tests
//!
//! Tests for message codes and expected response sizes.

use tokenwire::protocol::{
    expected_response_size, RequestCode, ResponseCode, ServerErrorCode, ERROR_RESPONSE_CODE,
};
use tokenwire::TokenError;

// =============================================================================
// Expected Sizes
// =============================================================================

#[test]
fn test_individual_sizes() {
    assert_eq!(
        expected_response_size(ResponseCode::IndividualTokenResponse, None).unwrap(),
        82
    );
    assert_eq!(
        expected_response_size(ResponseCode::IndividualTokenStatus, None).unwrap(),
        83
    );
}

#[test]
fn test_individual_sizes_ignore_count() {
    assert_eq!(
        expected_response_size(ResponseCode::IndividualTokenResponse, Some(7)).unwrap(),
        82
    );
}

#[test]
fn test_group_sizes() {
    for n in [1usize, 2, 3, 10, 100] {
        assert_eq!(
            expected_response_size(ResponseCode::GroupTokenResponse, Some(n)).unwrap(),
            4 + 80 * n + 64
        );
        assert_eq!(
            expected_response_size(ResponseCode::GroupTokenStatus, Some(n)).unwrap(),
            69 + 80 * n
        );
    }
}

#[test]
fn test_group_size_requires_count() {
    let result = expected_response_size(ResponseCode::GroupTokenStatus, None);
    assert!(matches!(result, Err(TokenError::InvalidInput(_))));
}

// =============================================================================
// Code Mapping
// =============================================================================

#[test]
fn test_response_for_request() {
    assert_eq!(
        ResponseCode::for_request(RequestCode::IndividualTokenRequest),
        ResponseCode::IndividualTokenResponse
    );
    assert_eq!(
        ResponseCode::for_request(RequestCode::IndividualTokenValidation),
        ResponseCode::IndividualTokenStatus
    );
    assert_eq!(
        ResponseCode::for_request(RequestCode::GroupTokenRequest),
        ResponseCode::GroupTokenResponse
    );
    assert_eq!(
        ResponseCode::for_request(RequestCode::GroupTokenValidation),
        ResponseCode::GroupTokenStatus
    );
}

#[test]
fn test_request_and_response_codes_are_disjoint() {
    let requests = [1u16, 3, 5, 7];
    for code in requests {
        assert!(RequestCode::try_from(code).is_ok());
        assert!(ResponseCode::try_from(code).is_err());
    }
    for code in [2u16, 4, 6, 8] {
        assert!(ResponseCode::try_from(code).is_ok());
        assert!(RequestCode::try_from(code).is_err());
    }
    assert!(ResponseCode::try_from(ERROR_RESPONSE_CODE).is_err());
}

#[test]
fn test_code_values() {
    assert_eq!(RequestCode::IndividualTokenRequest.as_u16(), 1);
    assert_eq!(RequestCode::GroupTokenValidation.as_u16(), 7);
    assert_eq!(ResponseCode::GroupTokenStatus.as_u16(), 8);
    assert_eq!(ERROR_RESPONSE_CODE, 256);
}

#[test]
fn test_is_group() {
    assert!(!ResponseCode::IndividualTokenResponse.is_group());
    assert!(!ResponseCode::IndividualTokenStatus.is_group());
    assert!(ResponseCode::GroupTokenResponse.is_group());
    assert!(ResponseCode::GroupTokenStatus.is_group());
}

#[test]
fn test_is_status() {
    assert!(!ResponseCode::IndividualTokenResponse.is_status());
    assert!(ResponseCode::IndividualTokenStatus.is_status());
    assert!(!ResponseCode::GroupTokenResponse.is_status());
    assert!(ResponseCode::GroupTokenStatus.is_status());
}

// =============================================================================
// Server Error Codes
// =============================================================================

#[test]
fn test_server_error_codes() {
    let expected = [
        (1u8, ServerErrorCode::InvalidMessageCode, "INVALID_MESSAGE_CODE"),
        (2, ServerErrorCode::IncorrectMessageLength, "INCORRECT_MESSAGE_LENGTH"),
        (3, ServerErrorCode::InvalidParameter, "INVALID_PARAMETER"),
        (4, ServerErrorCode::InvalidSingleToken, "INVALID_SINGLE_TOKEN"),
        (5, ServerErrorCode::AsciiDecodeError, "ASCII_DECODE_ERROR"),
    ];

    for (byte, code, name) in expected {
        assert_eq!(ServerErrorCode::try_from(byte).unwrap(), code);
        assert_eq!(code.to_string(), name);
    }
}

#[test]
fn test_unknown_server_error_code() {
    for byte in [0u8, 6, 255] {
        match ServerErrorCode::try_from(byte) {
            Err(TokenError::UnknownServerError(b)) => assert_eq!(b, byte),
            other => panic!("Expected UnknownServerError, got {:?}", other),
        }
    }
}

#[test]
fn test_server_error_display() {
    let err = TokenError::Server(ServerErrorCode::InvalidSingleToken);
    assert_eq!(err.to_string(), "Server error: INVALID_SINGLE_TOKEN");
}
