//! Network Module
//!
//! UDP transport and the request/response exchange engine.
//!
//! ## Architecture
//! - One socket per exchange, closed when the exchange ends
//! - Blocking receive with a per-attempt timeout
//! - Bounded re-send on timeout, no backoff

mod transport;
mod exchange;

pub use transport::{is_timeout, resolve, Transport, UdpTransport};
pub use exchange::{verify_response_code, Exchange, ExchangeState};
