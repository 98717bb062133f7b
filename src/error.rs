//! Error types for tokenwire
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::protocol::ServerErrorCode;

/// Result type alias using TokenError
pub type Result<T> = std::result::Result<T, TokenError>;

/// Unified error type for tokenwire operations
#[derive(Debug, Error)]
pub enum TokenError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not resolve server address: {0}")]
    Resolve(String),

    #[error("Limit of retries reached after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    /// Raised before any socket is opened.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Server error: {0}")]
    Server(ServerErrorCode),

    #[error("Server error: unknown error code {0}")]
    UnknownServerError(u8),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TokenError {
    /// True for errors raised from caller input, before any network I/O
    pub fn is_input_error(&self) -> bool {
        matches!(self, TokenError::InvalidInput(_))
    }
}
