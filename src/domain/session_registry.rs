//! In-memory store of joined players and team head counts.
//!
//! [`SessionRegistry`] is a plain owned value with `&mut self` mutators.
//! It is injected into [`crate::service::RelayService`], which serializes
//! all access behind a single lock so that every handler observes and
//! leaves the registry in a consistent state.

use std::collections::HashMap;

use super::player::{PlayerRecord, Vec3};
use super::{PlayerId, Team, TeamCounts};
use crate::error::GameError;

/// Default registry capacity.
pub const MAX_PLAYERS: usize = 50;

/// Default number of hits that triggers a respawn.
pub const RESPAWN_HITS: u32 = 3;

/// Result of a successful [`SessionRegistry::record_hit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    /// Hit count after this hit, before any respawn reset.
    pub hits: u32,
    /// The threshold was reached and the stored counter was reset to 0.
    pub respawn: bool,
}

/// Authoritative table of currently joined players.
///
/// # Invariants
///
/// - `len() <= max_players()` at all times.
/// - `team_counts().get(t)` equals the number of records on team `t`.
/// - At most one record per [`PlayerId`].
#[derive(Debug)]
pub struct SessionRegistry {
    players: HashMap<PlayerId, PlayerRecord>,
    team_counts: TeamCounts,
    max_players: usize,
    respawn_hits: u32,
}

impl SessionRegistry {
    /// Creates an empty registry with the given capacity and respawn
    /// threshold. Both are clamped to at least 1.
    #[must_use]
    pub fn new(max_players: usize, respawn_hits: u32) -> Self {
        let max_players = max_players.max(1);
        Self {
            players: HashMap::with_capacity(max_players),
            team_counts: TeamCounts::default(),
            max_players,
            respawn_hits: respawn_hits.max(1),
        }
    }

    /// Inserts a new record with zero hits and bumps the team count.
    ///
    /// # Errors
    ///
    /// - [`GameError::CapacityExceeded`] if the registry already holds
    ///   `max_players` records.
    /// - [`GameError::AlreadyJoined`] if `id` already has a record.
    pub fn create_player(
        &mut self,
        id: PlayerId,
        team: Team,
        position: Vec3,
        rotation: f64,
    ) -> Result<&PlayerRecord, GameError> {
        if self.players.contains_key(&id) {
            return Err(GameError::AlreadyJoined);
        }
        if self.is_full() {
            return Err(GameError::CapacityExceeded {
                max_players: self.max_players,
            });
        }
        self.team_counts.increment(team);
        Ok(self
            .players
            .entry(id)
            .or_insert_with(|| PlayerRecord::new(id, team, position, rotation)))
    }

    /// Stores the latest client-reported pose. Returns `false` (and does
    /// nothing) if `id` has no record.
    pub fn update_player(
        &mut self,
        id: PlayerId,
        position: Vec3,
        rotation: f64,
        animation_state: Option<serde_json::Value>,
    ) -> bool {
        let Some(record) = self.players.get_mut(&id) else {
            return false;
        };
        record.position = position;
        record.rotation = rotation;
        record.animation_state = animation_state;
        record.last_update_at = chrono::Utc::now();
        true
    }

    /// Increments the target's hit counter.
    ///
    /// When the new count reaches the respawn threshold the stored
    /// counter is reset to 0 in the same call; the returned
    /// [`HitOutcome::hits`] still reports the threshold value. Returns
    /// `None` if `target` has no record.
    pub fn record_hit(&mut self, target: PlayerId) -> Option<HitOutcome> {
        let record = self.players.get_mut(&target)?;
        let hits = record.hits.saturating_add(1);
        let respawn = hits >= self.respawn_hits;
        record.hits = if respawn { 0 } else { hits };
        Some(HitOutcome { hits, respawn })
    }

    /// Deletes the record and decrements its team count. Returns the
    /// removed record, or `None` if `id` had none.
    pub fn remove_player(&mut self, id: PlayerId) -> Option<PlayerRecord> {
        let record = self.players.remove(&id)?;
        self.team_counts.decrement(record.team);
        Some(record)
    }

    /// Returns a copy of every record except `exclude`, keyed by id.
    #[must_use]
    pub fn snapshot(&self, exclude: PlayerId) -> HashMap<PlayerId, PlayerRecord> {
        self.players
            .iter()
            .filter(|(id, _)| **id != exclude)
            .map(|(id, record)| (*id, record.clone()))
            .collect()
    }

    /// Returns the record for `id`, if joined.
    #[must_use]
    pub fn get(&self, id: PlayerId) -> Option<&PlayerRecord> {
        self.players.get(&id)
    }

    /// Returns all records sorted by join time.
    #[must_use]
    pub fn players(&self) -> Vec<PlayerRecord> {
        let mut players: Vec<PlayerRecord> = self.players.values().cloned().collect();
        players.sort_by_key(|p| (p.joined_at, p.id));
        players
    }

    /// Current per-team head count.
    #[must_use]
    pub const fn team_counts(&self) -> TeamCounts {
        self.team_counts
    }

    /// Number of joined players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Returns `true` if nobody has joined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Returns `true` if another join would be rejected.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players
    }

    /// Configured capacity.
    #[must_use]
    pub const fn max_players(&self) -> usize {
        self.max_players
    }

    /// Configured respawn threshold.
    #[must_use]
    pub const fn respawn_hits(&self) -> u32 {
        self.respawn_hits
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new(MAX_PLAYERS, RESPAWN_HITS)
    }
}
