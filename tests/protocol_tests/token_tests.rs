//! Access String Tests
//!
//! Tests for SAS and GAS text forms.

use tokenwire::protocol::{validate_id, Gas, Sas, Token};
use tokenwire::TokenError;

// =============================================================================
// Helper Functions
// =============================================================================

fn token_of(c: char) -> String {
    std::iter::repeat(c).take(64).collect()
}

fn sas_text(id: &str, nonce: u32, c: char) -> String {
    format!("{}:{}:{}", id, nonce, token_of(c))
}

// =============================================================================
// Token Tests
// =============================================================================

#[test]
fn test_token_exact_length() {
    assert!(Token::new(token_of('a')).is_ok());
    assert!(matches!(
        Token::new("a".repeat(63)),
        Err(TokenError::InvalidInput(_))
    ));
    assert!(matches!(
        Token::new("a".repeat(65)),
        Err(TokenError::InvalidInput(_))
    ));
}

#[test]
fn test_token_from_wire_rejects_non_ascii() {
    let mut raw = [b'a'; 64];
    raw[10] = 0xC3;
    assert!(matches!(Token::from_wire(&raw), Err(TokenError::Decode(_))));
}

// =============================================================================
// SAS Tests
// =============================================================================

#[test]
fn test_sas_parse_and_display() {
    let text = sas_text("user1", 42, 'f');
    let sas: Sas = text.parse().unwrap();

    assert_eq!(sas.id(), "user1");
    assert_eq!(sas.nonce(), 42);
    assert_eq!(sas.token().as_str(), token_of('f'));
    assert_eq!(sas.to_string(), text);
}

#[test]
fn test_sas_field_count() {
    let too_few = format!("user1:{}", token_of('a'));
    let too_many = format!("user1:0:{}:extra", token_of('a'));

    assert!(matches!(too_few.parse::<Sas>(), Err(TokenError::InvalidInput(_))));
    assert!(matches!(too_many.parse::<Sas>(), Err(TokenError::InvalidInput(_))));
}

#[test]
fn test_sas_bad_nonce() {
    for nonce in ["-1", "abc", "4294967296", ""] {
        let text = format!("user1:{}:{}", nonce, token_of('a'));
        let err = text.parse::<Sas>().unwrap_err();
        assert!(err.to_string().contains("nonce"), "{}", err);
    }
}

#[test]
fn test_sas_max_nonce() {
    let sas: Sas = sas_text("u", u32::MAX, 'a').parse().unwrap();
    assert_eq!(sas.nonce(), u32::MAX);
}

#[test]
fn test_sas_id_limits() {
    assert!(sas_text("abcdefghijkl", 0, 'a').parse::<Sas>().is_ok());
    assert!(sas_text("", 0, 'a').parse::<Sas>().is_ok());

    let err = sas_text("abcdefghijklm", 0, 'a').parse::<Sas>().unwrap_err();
    assert!(err.is_input_error());
}

#[test]
fn test_sas_short_token() {
    let text = format!("user1:0:{}", "a".repeat(10));
    assert!(text.parse::<Sas>().is_err());
}

// =============================================================================
// GAS Tests
// =============================================================================

#[test]
fn test_gas_round_trip() {
    let text = format!(
        "{}+{}+{}+{}",
        sas_text("a", 0, 'T'),
        sas_text("b", 1, 'U'),
        sas_text("c", 2, 'V'),
        token_of('G')
    );
    let gas: Gas = text.parse().unwrap();

    assert_eq!(gas.len(), 3);
    assert_eq!(gas.to_string(), text);
}

#[test]
fn test_gas_preserves_member_order() {
    let text = format!(
        "{}+{}+{}",
        sas_text("second", 2, 'b'),
        sas_text("first", 1, 'a'),
        token_of('g')
    );
    let gas: Gas = text.parse().unwrap();

    let ids: Vec<&str> = gas.members().iter().map(|s| s.id()).collect();
    assert_eq!(ids, vec!["second", "first"]);
    assert_eq!(gas.token().as_str(), token_of('g'));
}

#[test]
fn test_gas_needs_a_member() {
    assert!(token_of('g').parse::<Gas>().is_err());
    assert!("".parse::<Gas>().is_err());
}

#[test]
fn test_gas_bad_member() {
    let text = format!("user1:0+{}", token_of('g'));
    assert!(matches!(text.parse::<Gas>(), Err(TokenError::InvalidInput(_))));
}

#[test]
fn test_gas_bad_group_token() {
    let text = format!("{}+short", sas_text("a", 0, 'T'));
    assert!(text.parse::<Gas>().is_err());
}

#[test]
fn test_gas_new_rejects_empty() {
    assert!(Gas::new(Vec::new(), Token::new(token_of('g')).unwrap()).is_err());
}

#[test]
fn test_id_rejects_separators() {
    for id in ["a:b", "a+b", ":", "+lead"] {
        let err = validate_id(id).unwrap_err();
        assert!(err.is_input_error(), "{:?} accepted", id);
    }
    assert!(validate_id("a-b_c.d").is_ok());
}

#[test]
fn test_sas_rejects_plus_in_id() {
    let err = sas_text("a+b", 0, 'T').parse::<Sas>().unwrap_err();
    assert!(matches!(err, TokenError::InvalidInput(_)));
}
