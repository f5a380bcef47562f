//! Service layer: the event relay.

pub mod relay_service;

pub use relay_service::{RelayRules, RelayService, RosterSnapshot};
