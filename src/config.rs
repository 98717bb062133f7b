//! Configuration for tokenwire
//!
//! Centralized configuration with sensible defaults.

use std::time::Duration;

use crate::error::{Result, TokenError};

/// Default per-attempt receive timeout
pub const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of send attempts (1 original + 2 retries)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default server port
pub const DEFAULT_PORT: u16 = 51001;

/// Main configuration for a tokenwire client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Server Configuration
    // -------------------------------------------------------------------------
    /// Hostname or IP literal (v4 or v6) of the token server
    pub server_host: String,

    /// UDP port of the token server
    pub server_port: u16,

    // -------------------------------------------------------------------------
    // Exchange Configuration
    // -------------------------------------------------------------------------
    /// How long a single attempt waits for a reply
    pub recv_timeout: Duration,

    /// Total number of sends before giving up
    pub max_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".to_string(),
            server_port: DEFAULT_PORT,
            recv_timeout: DEFAULT_RECV_TIMEOUT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the config can drive an exchange
    pub fn validate(&self) -> Result<()> {
        if self.server_host.trim().is_empty() {
            return Err(TokenError::Config("server host is empty".to_string()));
        }
        if self.recv_timeout.is_zero() {
            return Err(TokenError::Config(
                "receive timeout must be greater than zero".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(TokenError::Config(
                "at least one attempt is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the server hostname or address literal
    pub fn server_host(mut self, host: impl Into<String>) -> Self {
        self.config.server_host = host.into();
        self
    }

    /// Set the server port
    pub fn server_port(mut self, port: u16) -> Self {
        self.config.server_port = port;
        self
    }

    /// Set the per-attempt receive timeout
    pub fn recv_timeout(mut self, timeout: Duration) -> Self {
        self.config.recv_timeout = timeout;
        self
    }

    /// Set the per-attempt receive timeout (in milliseconds)
    pub fn recv_timeout_ms(mut self, ms: u64) -> Self {
        self.config.recv_timeout = Duration::from_millis(ms);
        self
    }

    /// Set the total number of send attempts
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.config.max_attempts = attempts;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
