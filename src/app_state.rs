//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::GameConfig;
use crate::domain::{EventBus, SessionRegistry};
use crate::service::{RelayRules, RelayService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The event relay, which owns the session registry.
    pub relay: Arc<RelayService>,
    /// Configuration the server was started with.
    pub config: Arc<GameConfig>,
}

impl AppState {
    /// Builds a fresh registry, bus, and relay from `config`.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        let registry = SessionRegistry::new(config.max_players, config.respawn_hits);
        let event_bus = EventBus::new(config.event_bus_capacity);
        let rules = RelayRules {
            friendly_fire: config.friendly_fire,
        };
        Self {
            relay: Arc::new(RelayService::new(registry, event_bus, rules)),
            config: Arc::new(config),
        }
    }
}
