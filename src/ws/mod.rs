//! WebSocket layer: connection handling, inbound messages, per-connection
//! lifecycle and rate limiting.
//!
//! The endpoint at `/ws` carries the whole game protocol. Each connection
//! is one player slot candidate.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod rate_limit;
pub mod session;
