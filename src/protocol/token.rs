//! Access string types
//!
//! `Sas` (Signed Access String) and `Gas` (Group Access String), with their
//! textual forms:
//!
//! ```text
//! SAS: {id}:{nonce}:{token}
//! GAS: {sas1}+{sas2}+...+{sasN}+{group_token}
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TokenError};
use super::codes::{ID_SIZE, TOKEN_SIZE};

/// Separator between the fields of a SAS
pub const SAS_SEPARATOR: char = ':';

/// Separator between the segments of a GAS
pub const GAS_SEPARATOR: char = '+';

// =============================================================================
// Token
// =============================================================================

/// Opaque server-issued token: exactly 64 ASCII bytes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.len() != TOKEN_SIZE {
            return Err(TokenError::InvalidInput(format!(
                "token must be {} bytes, got {}",
                TOKEN_SIZE,
                token.len()
            )));
        }
        if !token.is_ascii() {
            return Err(TokenError::InvalidInput("token must be ASCII".to_string()));
        }
        Ok(Self(token))
    }

    /// Build a token from wire bytes
    pub fn from_wire(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != TOKEN_SIZE {
            return Err(TokenError::Decode(format!(
                "token field must be {} bytes, got {}",
                TOKEN_SIZE,
                bytes.len()
            )));
        }
        if !bytes.is_ascii() {
            return Err(TokenError::Decode("token is not ASCII".to_string()));
        }
        let token = String::from_utf8(bytes.to_vec())
            .map_err(|e| TokenError::Decode(format!("token is not ASCII: {}", e)))?;
        Ok(Self(token))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Identifier
// =============================================================================

/// Check that an id fits the 12-byte ASCII field
///
/// Ids may not contain the SAS or GAS separators, or the issued text could
/// not be parsed back.
pub fn validate_id(id: &str) -> Result<()> {
    if !id.is_ascii() {
        return Err(TokenError::InvalidInput(format!("id must be ASCII: {:?}", id)));
    }
    if id.contains(&[SAS_SEPARATOR, GAS_SEPARATOR][..]) {
        return Err(TokenError::InvalidInput(format!(
            "id must not contain '{}' or '{}': {:?}",
            SAS_SEPARATOR, GAS_SEPARATOR, id
        )));
    }
    if id.len() > ID_SIZE {
        return Err(TokenError::InvalidInput(format!(
            "id must be at most {} bytes, got {}",
            ID_SIZE,
            id.len()
        )));
    }
    Ok(())
}

/// Parse a nonce argument
pub fn parse_nonce(text: &str) -> Result<u32> {
    text.parse::<u32>().map_err(|_| {
        TokenError::InvalidInput(format!(
            "nonce must be an unsigned 32-bit integer, got {:?}",
            text
        ))
    })
}

// =============================================================================
// SAS
// =============================================================================

/// Signed Access String: one identity, its nonce and its issued token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sas {
    id: String,
    nonce: u32,
    token: Token,
}

impl Sas {
    pub fn new(id: impl Into<String>, nonce: u32, token: Token) -> Result<Self> {
        let id = id.into();
        validate_id(&id)?;
        Ok(Self { id, nonce, token })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn nonce(&self) -> u32 {
        self.nonce
    }

    pub fn token(&self) -> &Token {
        &self.token
    }
}

impl fmt::Display for Sas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.id, SAS_SEPARATOR, self.nonce, SAS_SEPARATOR, self.token
        )
    }
}

impl FromStr for Sas {
    type Err = TokenError;

    fn from_str(text: &str) -> Result<Self> {
        let fields: Vec<&str> = text.split(SAS_SEPARATOR).collect();
        let [id, nonce, token] = fields.as_slice() else {
            return Err(TokenError::InvalidInput(format!(
                "SAS must have 3 ':'-separated fields (id:nonce:token), got {}",
                fields.len()
            )));
        };

        Sas::new(*id, parse_nonce(nonce)?, Token::new(*token)?)
    }
}

// =============================================================================
// GAS
// =============================================================================

/// Group Access String: N member SAS in order, plus one group token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Gas {
    members: Vec<Sas>,
    token: Token,
}

impl Gas {
    pub fn new(members: Vec<Sas>, token: Token) -> Result<Self> {
        if members.is_empty() {
            return Err(TokenError::InvalidInput(
                "GAS needs at least one member SAS".to_string(),
            ));
        }
        if members.len() > u16::MAX as usize {
            return Err(TokenError::InvalidInput(format!(
                "GAS has {} members, at most {} fit the count field",
                members.len(),
                u16::MAX
            )));
        }
        Ok(Self { members, token })
    }

    pub fn members(&self) -> &[Sas] {
        &self.members
    }

    pub fn token(&self) -> &Token {
        &self.token
    }

    /// Number of member SAS
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; a GAS holds at least one member
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl fmt::Display for Gas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for sas in &self.members {
            write!(f, "{}{}", sas, GAS_SEPARATOR)?;
        }
        write!(f, "{}", self.token)
    }
}

impl FromStr for Gas {
    type Err = TokenError;

    fn from_str(text: &str) -> Result<Self> {
        let mut segments: Vec<&str> = text.split(GAS_SEPARATOR).collect();
        let token = match segments.pop() {
            Some(token) if !segments.is_empty() => Token::new(token)?,
            _ => {
                return Err(TokenError::InvalidInput(
                    "GAS must have at least one SAS followed by a group token".to_string(),
                ))
            }
        };

        let members = segments
            .into_iter()
            .map(|segment| segment.parse::<Sas>())
            .collect::<Result<Vec<Sas>>>()?;

        Gas::new(members, token)
    }
}
