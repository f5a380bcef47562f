//! Relay configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Missing or unparsable numeric values
//! fall back to their defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::domain::session_registry::{MAX_PLAYERS, RESPAWN_HITS};

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Top-level relay configuration.
///
/// Loaded once at startup via [`GameConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// Maximum number of simultaneously joined players.
    pub max_players: usize,

    /// Hits that trigger a respawn.
    pub respawn_hits: u32,

    /// Whether a projectile can hit a player of its own team.
    pub friendly_fire: bool,

    /// Capacity of the outbound broadcast channel.
    pub event_bus_capacity: usize,

    /// `updatePosition` frames per second accepted per connection
    /// (0 = unlimited). Other events are never throttled.
    pub input_rate_limit: u32,

    /// Directory of static client assets to serve, if any.
    pub static_dir: Option<PathBuf>,

    /// Tracing output format.
    pub log_format: LogFormat,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            max_players: MAX_PLAYERS,
            respawn_hits: RESPAWN_HITS,
            friendly_fire: true,
            event_bus_capacity: 4096,
            input_rate_limit: 240,
            static_dir: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl GameConfig {
    /// Loads configuration from environment variables.
    ///
    /// `PORT` wins over `LISTEN_ADDR` so the server works unchanged on
    /// hosts that only hand out a port. Calls `dotenvy::dotenv().ok()` to
    /// optionally load a `.env` file first.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting listen address cannot be parsed
    /// as a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let listen_addr: SocketAddr = match std::env::var("PORT") {
            Ok(port) => format!("0.0.0.0:{port}").parse()?,
            Err(_) => std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| defaults.listen_addr.to_string())
                .parse()?,
        };

        let max_players = parse_env("MAX_PLAYERS", defaults.max_players).max(1);
        let respawn_hits = parse_env("RESPAWN_HITS", defaults.respawn_hits).max(1);
        let friendly_fire = parse_env_bool("FRIENDLY_FIRE", defaults.friendly_fire);
        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", defaults.event_bus_capacity);
        let input_rate_limit = parse_env("INPUT_RATE_LIMIT", defaults.input_rate_limit);

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            max_players,
            respawn_hits,
            friendly_fire,
            event_bus_capacity,
            input_rate_limit,
            static_dir,
            log_format,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parses an environment variable as a boolean. Accepts `"true"`, `"1"`,
/// `"false"`, `"0"` (case-insensitive). Returns `default` otherwise.
fn parse_env_bool(key: &str, default: bool) -> bool {
    match std::env::var(key)
        .ok()
        .map(|v| v.trim().to_ascii_lowercase())
        .as_deref()
    {
        Some("true") | Some("1") => true,
        Some("false") | Some("0") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_game_rules() {
        let config = GameConfig::default();
        assert_eq!(config.max_players, 50);
        assert_eq!(config.respawn_hits, 3);
        assert!(config.friendly_fire);
        assert!(config.static_dir.is_none());
        assert_eq!(config.listen_addr.port(), 3000);
    }

    #[test]
    fn parse_env_falls_back_on_missing_key() {
        assert_eq!(parse_env("PAINT_RELAY_TEST_SURELY_UNSET", 7_u32), 7);
        assert!(parse_env_bool("PAINT_RELAY_TEST_SURELY_UNSET", true));
    }
}
