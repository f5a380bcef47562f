//! Outbound notifications and their routing.
//!
//! Every relay handler turns its outcome into one or more [`Delivery`]
//! values published on the [`super::EventBus`]. Each WebSocket connection
//! forwards only the deliveries whose [`Recipient`] matches its own id.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::player::{PlayerRecord, Vec3};
use super::{PlayerId, Team};

/// Server → client event, serialized as `{"event": <name>, "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// First frame on every connection: tells the client its own id.
    Connected(ConnectedPayload),

    /// Reply to a successful join: everyone already in the game.
    CurrentPlayers(HashMap<PlayerId, PlayerRecord>),

    /// A new player joined.
    PlayerJoined(PlayerJoinedPayload),

    /// A player reported a new pose.
    PlayerMoved(PlayerMovedPayload),

    /// Echo of a paint splat from another client.
    PaintSurface(PaintSurfacePayload),

    /// The receiving player was hit.
    Hit(HitPayload),

    /// The receiving player reached the respawn threshold.
    Respawn,

    /// A joined player disconnected.
    PlayerLeft(PlayerId),

    /// A request from the receiving connection was rejected.
    Error(ErrorPayload),
}

impl ServerEvent {
    /// Returns the wire name of the event.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Connected(_) => "connected",
            Self::CurrentPlayers(_) => "currentPlayers",
            Self::PlayerJoined(_) => "playerJoined",
            Self::PlayerMoved(_) => "playerMoved",
            Self::PaintSurface(_) => "paintSurface",
            Self::Hit(_) => "hit",
            Self::Respawn => "respawn",
            Self::PlayerLeft(_) => "playerLeft",
            Self::Error(_) => "error",
        }
    }
}

/// Payload of [`ServerEvent::Connected`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectedPayload {
    /// The id assigned to this connection.
    pub id: PlayerId,
}

/// Payload of [`ServerEvent::PlayerJoined`]. Hits and animation state
/// are deliberately absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerJoinedPayload {
    /// The joining player.
    pub id: PlayerId,
    /// Chosen team.
    pub team: Team,
    /// Spawn position.
    pub position: Vec3,
    /// Spawn yaw.
    pub rotation: f64,
}

/// Payload of [`ServerEvent::PlayerMoved`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMovedPayload {
    /// The moving player.
    pub id: PlayerId,
    /// New position.
    pub position: Vec3,
    /// New yaw.
    pub rotation: f64,
    /// Opaque animation hint, forwarded verbatim (`null` when absent).
    pub animation_state: Option<serde_json::Value>,
}

/// Paint splat, inbound and outbound alike.
///
/// The relay never inspects it: whatever JSON the painter sent under
/// `data` (usually `{position, normal, team}`) is echoed unchanged,
/// including fields and values it does not recognise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaintSurfacePayload(pub serde_json::Value);

/// Payload of [`ServerEvent::Hit`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HitPayload {
    /// Hit count after this hit (equals the threshold on respawn).
    pub current_hits: u32,
    /// Where the paint landed.
    pub hit_position: Vec3,
    /// Team of the projectile that hit.
    pub projectile_team: Team,
}

/// Payload of [`ServerEvent::Error`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    /// Numeric code, see [`crate::error::GameError::error_code`].
    pub code: u32,
    /// Human-readable reason.
    pub message: String,
}

/// Which connections a [`Delivery`] is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    /// Every connection except the given one (sender-exclusive broadcast).
    AllExcept(PlayerId),
    /// Exactly one connection.
    Only(PlayerId),
}

impl Recipient {
    /// Returns `true` if a connection with id `id` should receive it.
    #[must_use]
    pub fn includes(&self, id: PlayerId) -> bool {
        match self {
            Self::AllExcept(excluded) => *excluded != id,
            Self::Only(target) => *target == id,
        }
    }
}

/// An event paired with its routing. Cheap to clone: the event is shared.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// Who receives it.
    pub recipient: Recipient,
    /// What they receive.
    pub event: Arc<ServerEvent>,
}

impl Delivery {
    /// Broadcast to everyone but `sender`.
    #[must_use]
    pub fn all_except(sender: PlayerId, event: ServerEvent) -> Self {
        Self {
            recipient: Recipient::AllExcept(sender),
            event: Arc::new(event),
        }
    }

    /// Send to `target` only.
    #[must_use]
    pub fn only(target: PlayerId, event: ServerEvent) -> Self {
        Self {
            recipient: Recipient::Only(target),
            event: Arc::new(event),
        }
    }
}
