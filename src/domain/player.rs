//! Player record held by the session registry.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{PlayerId, Team};

/// World-space 3-vector as sent by clients (`[x, y, z]`).
pub type Vec3 = [f64; 3];

/// Server-side state for one joined player.
///
/// Position, rotation, and animation state are client-authoritative and
/// stored exactly as reported. `hits` is the only server-owned field.
/// Serialized as the value type of the `currentPlayers` map.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    /// Connection identity of the owner.
    pub id: PlayerId,

    /// Team chosen at join time. Never changes afterwards.
    pub team: Team,

    /// Last reported position.
    #[schema(value_type = Vec<f64>)]
    pub position: Vec3,

    /// Last reported yaw in radians.
    pub rotation: f64,

    /// Last reported animation hint, forwarded as-is. `None` until the
    /// first `updatePosition`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub animation_state: Option<serde_json::Value>,

    /// Paint hits taken since the last respawn.
    pub hits: u32,

    /// When the record was created.
    #[serde(skip)]
    pub joined_at: DateTime<Utc>,

    /// When position/rotation were last reported.
    #[serde(skip)]
    pub last_update_at: DateTime<Utc>,
}

impl PlayerRecord {
    /// Creates a fresh record with zero hits and no animation state.
    #[must_use]
    pub fn new(id: PlayerId, team: Team, position: Vec3, rotation: f64) -> Self {
        let now = Utc::now();
        Self {
            id,
            team,
            position,
            rotation,
            animation_state: None,
            hits: 0,
            joined_at: now,
            last_update_at: now,
        }
    }
}
