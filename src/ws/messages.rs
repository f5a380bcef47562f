//! Inbound WebSocket messages.
//!
//! Every text frame is one named event, adjacently tagged:
//! `{"event": "joinGame", "data": {...}}`. Field names are camelCase.

use serde::Deserialize;

use crate::domain::game_event::PaintSurfacePayload;
use crate::domain::{PlayerId, Team, Vec3};
use crate::error::GameError;

/// Client → server event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// Claim a player slot on a team.
    JoinGame(JoinGame),
    /// Report the sender's latest pose.
    UpdatePosition(UpdatePosition),
    /// A paint splat landed on world geometry.
    PaintSurface(PaintSurfacePayload),
    /// The sender's projectile hit another player.
    PlayerHit(PlayerHit),
}

impl ClientEvent {
    /// Decodes one text frame.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidPayload`] for malformed JSON, unknown
    /// event names, missing or mistyped fields, or an unknown team.
    pub fn decode(text: &str) -> Result<Self, GameError> {
        serde_json::from_str(text).map_err(|e| GameError::InvalidPayload(e.to_string()))
    }

    /// Returns the wire name of the event.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::JoinGame(_) => "joinGame",
            Self::UpdatePosition(_) => "updatePosition",
            Self::PaintSurface(_) => "paintSurface",
            Self::PlayerHit(_) => "playerHit",
        }
    }
}

/// Payload of `joinGame`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JoinGame {
    /// Team to join.
    pub team: Team,
    /// Spawn position.
    pub position: Vec3,
    /// Spawn yaw in radians.
    pub rotation: f64,
}

/// Payload of `updatePosition`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePosition {
    /// Current position.
    pub position: Vec3,
    /// Current yaw in radians.
    pub rotation: f64,
    /// Opaque animation hint.
    #[serde(default)]
    pub animation_state: Option<serde_json::Value>,
}

/// Payload of `playerHit`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerHit {
    /// Who was hit, as sent. Not required to be a valid id: anything
    /// that names no joined player is an unknown target.
    pub hit_player_id: String,
    /// Where the paint landed.
    pub position: Vec3,
    /// Team of the projectile.
    pub projectile_team: Team,
}

impl PlayerHit {
    /// The target as a [`PlayerId`], or `None` if the string is not one.
    #[must_use]
    pub fn target(&self) -> Option<PlayerId> {
        uuid::Uuid::parse_str(&self.hit_player_id)
            .ok()
            .map(PlayerId::from_uuid)
    }
}
