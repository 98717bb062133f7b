//! # tokenwire
//!
//! A client for a binary, token-based authentication protocol over UDP:
//! - Individual token issuance and validation (SAS)
//! - Group token issuance and validation (GAS)
//! - Timeout with bounded re-send, one socket per exchange
//! - IPv4 and IPv6, picked by resolving the server host
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        CLI / Client                          │
//! │               (itr, itv, gtr, gtv → Request)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Codec    │          │  Exchange   │
//!   │ (SAS / GAS) │          │  (retries)  │
//!   └─────────────┘          └──────┬──────┘
//!                                   │
//!                                   ▼
//!                           ┌─────────────┐
//!                           │  Transport  │
//!                           │    (UDP)    │
//!                           └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TokenError, Result};
pub use config::Config;
pub use client::Client;
pub use protocol::{Gas, Reply, Request, Sas, Token};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of tokenwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
