//! # paint-relay
//!
//! Authoritative WebSocket relay for a browser-based multiplayer paint tag
//! game.
//!
//! Clients simulate movement, aiming and paint locally. The relay owns
//! the roster: it admits players up to a fixed capacity, keeps the last
//! reported transform of each one, counts hits, triggers respawns, and
//! fans every change out to the other connected clients.
//!
//! ## Architecture
//!
//! ```text
//! Clients (WebSocket /ws, HTTP /api/v1, static assets)
//!     │
//!     ├── WS Connection Loop (ws/)
//!     ├── REST Handlers (api/)
//!     │
//!     ├── RelayService (service/)      one handler at a time
//!     │
//!     ├── SessionRegistry (domain/)
//!     └── EventBus (domain/)           addressed deliveries to every connection
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod router;
pub mod service;
pub mod ws;

pub use router::build_app;
