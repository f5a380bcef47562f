//! Roster DTOs for the read-only player endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{PlayerId, PlayerRecord, Team, TeamCounts};

/// One joined player as seen over REST.
///
/// Unlike the WebSocket record, includes join and last-update times.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDto {
    /// Connection identity.
    pub id: PlayerId,
    /// Team chosen at join.
    pub team: Team,
    /// Last reported position `[x, y, z]`.
    pub position: Vec<f64>,
    /// Last reported yaw in radians.
    pub rotation: f64,
    /// Hits since last respawn.
    pub hits: u32,
    /// Join time.
    pub joined_at: DateTime<Utc>,
    /// Time of the last pose update.
    pub last_update_at: DateTime<Utc>,
}

impl From<PlayerRecord> for PlayerDto {
    fn from(record: PlayerRecord) -> Self {
        Self {
            id: record.id,
            team: record.team,
            position: record.position.to_vec(),
            rotation: record.rotation,
            hits: record.hits,
            joined_at: record.joined_at,
            last_update_at: record.last_update_at,
        }
    }
}

/// Response body for `GET /api/v1/players`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerListResponse {
    /// Joined players, oldest first.
    pub players: Vec<PlayerDto>,
    /// Per-team head count.
    pub team_counts: TeamCounts,
    /// Registry capacity.
    pub max_players: usize,
}

/// Response body for `GET /api/v1/teams`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamStatsResponse {
    /// Players on red.
    pub red: usize,
    /// Players on blue.
    pub blue: usize,
    /// Joined players in total.
    pub total: usize,
    /// Registry capacity.
    pub max_players: usize,
    /// Open WebSocket connections, joined or not.
    pub connections: usize,
}
