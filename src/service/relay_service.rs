//! Event relay: validates inbound events, mutates the session registry,
//! and fans notifications out to the right connections.

use tokio::sync::Mutex;

use crate::domain::game_event::{
    HitPayload, PaintSurfacePayload, PlayerJoinedPayload, PlayerMovedPayload,
};
use crate::domain::{
    EventBus, HitOutcome, PlayerId, PlayerRecord, ServerEvent, SessionRegistry, TeamCounts,
};
use crate::error::GameError;
use crate::ws::messages::{ClientEvent, JoinGame, PlayerHit, UpdatePosition};
use crate::ws::session::SessionPhase;

/// Rules the relay applies on top of the registry.
#[derive(Debug, Clone, Copy)]
pub struct RelayRules {
    /// When `false`, hits whose projectile team equals the target's team
    /// are dropped.
    pub friendly_fire: bool,
}

impl Default for RelayRules {
    fn default() -> Self {
        Self {
            friendly_fire: true,
        }
    }
}

/// Read-only view of the registry for status endpoints.
#[derive(Debug, Clone)]
pub struct RosterSnapshot {
    /// All joined players, oldest first.
    pub players: Vec<PlayerRecord>,
    /// Per-team head count.
    pub team_counts: TeamCounts,
    /// Registry capacity.
    pub max_players: usize,
}

/// Protocol surface between connections and the [`SessionRegistry`].
///
/// Owns the injected registry behind a single async mutex. Every handler
/// holds that lock for its whole body, mutates the registry, and publishes
/// its deliveries before releasing it, so handlers are strictly serialized
/// and published notifications follow registry order. Nothing awaited
/// under the lock can block: registry calls are in-memory and
/// [`EventBus::publish`] never waits.
#[derive(Debug)]
pub struct RelayService {
    registry: Mutex<SessionRegistry>,
    event_bus: EventBus,
    rules: RelayRules,
}

impl RelayService {
    /// Creates a relay over an injected registry and bus.
    #[must_use]
    pub fn new(registry: SessionRegistry, event_bus: EventBus, rules: RelayRules) -> Self {
        Self {
            registry: Mutex::new(registry),
            event_bus,
            rules,
        }
    }

    /// Returns a reference to the outbound [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Dispatches one decoded inbound event.
    ///
    /// Errors are reported to `sender` as an `error` frame and never
    /// returned; every other failure mode is an absorbed no-op.
    pub async fn handle_event(
        &self,
        sender: PlayerId,
        phase: &mut SessionPhase,
        event: ClientEvent,
    ) {
        match event {
            ClientEvent::JoinGame(join) => {
                if let Err(err) = self.join_game(sender, phase, join).await {
                    tracing::warn!(player_id = %sender, error = %err, "join rejected");
                    self.reject(sender, &err);
                }
            }
            ClientEvent::UpdatePosition(update) => {
                self.update_position(sender, phase, update).await;
            }
            ClientEvent::PaintSurface(paint) => {
                self.paint_surface(sender, paint);
            }
            ClientEvent::PlayerHit(hit) => {
                self.player_hit(hit).await;
            }
        }
    }

    /// Sends `err` to `target` only.
    pub fn reject(&self, target: PlayerId, err: &GameError) {
        self.event_bus.send_to(target, err.to_event());
    }

    /// Handles `joinGame`.
    ///
    /// On success the sender receives `currentPlayers` (everyone but
    /// itself), every other connection receives `playerJoined`, and
    /// `phase` becomes [`SessionPhase::Joined`].
    ///
    /// # Errors
    ///
    /// - [`GameError::AlreadyJoined`] if `phase` is already joined.
    /// - [`GameError::CapacityExceeded`] if the registry is full.
    ///
    /// State and `phase` are unchanged on error.
    pub async fn join_game(
        &self,
        sender: PlayerId,
        phase: &mut SessionPhase,
        join: JoinGame,
    ) -> Result<(), GameError> {
        if phase.is_joined() {
            return Err(GameError::AlreadyJoined);
        }

        let mut registry = self.registry.lock().await;
        registry.create_player(sender, join.team, join.position, join.rotation)?;
        *phase = SessionPhase::joined(join.team);

        let existing = registry.snapshot(sender);
        self.event_bus.send_to(sender, ServerEvent::CurrentPlayers(existing));
        self.event_bus.broadcast_except(
            sender,
            ServerEvent::PlayerJoined(PlayerJoinedPayload {
                id: sender,
                team: join.team,
                position: join.position,
                rotation: join.rotation,
            }),
        );

        tracing::info!(
            player_id = %sender,
            team = %join.team,
            team_counts = %registry.team_counts(),
            "player joined"
        );
        Ok(())
    }

    /// Handles `updatePosition`. Returns `true` if `playerMoved` was
    /// broadcast.
    ///
    /// Dropped without touching the registry while `phase` is unjoined;
    /// a registry miss while joined (a race with teardown) is also a
    /// silent no-op.
    pub async fn update_position(
        &self,
        sender: PlayerId,
        phase: &SessionPhase,
        update: UpdatePosition,
    ) -> bool {
        if !phase.is_joined() {
            tracing::trace!(player_id = %sender, "position update before join dropped");
            return false;
        }

        let mut registry = self.registry.lock().await;
        let stored = registry.update_player(
            sender,
            update.position,
            update.rotation,
            update.animation_state.clone(),
        );
        if !stored {
            return false;
        }

        self.event_bus.broadcast_except(
            sender,
            ServerEvent::PlayerMoved(PlayerMovedPayload {
                id: sender,
                position: update.position,
                rotation: update.rotation,
                animation_state: update.animation_state,
            }),
        );
        true
    }

    /// Handles `paintSurface`: echoes the splat to every other connection.
    /// No registry involvement and no check on the sender's phase.
    pub fn paint_surface(&self, sender: PlayerId, paint: PaintSurfacePayload) {
        self.event_bus.broadcast_except(sender, ServerEvent::PaintSurface(paint));
    }

    /// Handles `playerHit`.
    ///
    /// Sends `hit` to the target only and, when the threshold is reached,
    /// `respawn` to the target only. The attacker gets nothing. Returns
    /// `None` if the target is unknown (including an id that does not
    /// parse) or the hit was filtered out as friendly fire.
    pub async fn player_hit(&self, hit: PlayerHit) -> Option<HitOutcome> {
        let Some(target) = hit.target() else {
            tracing::debug!(
                hit_player_id = %hit.hit_player_id,
                "hit on unparsable id ignored"
            );
            return None;
        };
        let mut registry = self.registry.lock().await;

        let target_team = registry.get(target)?.team;
        if !self.rules.friendly_fire && target_team == hit.projectile_team {
            tracing::debug!(player_id = %target, "friendly hit ignored");
            return None;
        }

        let outcome = registry.record_hit(target)?;
        self.event_bus.send_to(
            target,
            ServerEvent::Hit(HitPayload {
                current_hits: outcome.hits,
                hit_position: hit.position,
                projectile_team: hit.projectile_team,
            }),
        );
        if outcome.respawn {
            self.event_bus.send_to(target, ServerEvent::Respawn);
            tracing::info!(player_id = %target, hits = outcome.hits, "respawn triggered");
        }
        Some(outcome)
    }

    /// Handles transport disconnect. Returns `true` if a record existed
    /// and `playerLeft` was broadcast.
    ///
    /// Consumes the phase: the connection is gone afterwards.
    pub async fn disconnect(&self, sender: PlayerId, phase: SessionPhase) -> bool {
        if !phase.is_joined() {
            return false;
        }

        let mut registry = self.registry.lock().await;
        let Some(record) = registry.remove_player(sender) else {
            return false;
        };
        self.event_bus.broadcast_except(sender, ServerEvent::PlayerLeft(sender));

        tracing::info!(
            player_id = %sender,
            team = %record.team,
            team_counts = %registry.team_counts(),
            "player left"
        );
        true
    }

    /// Returns a copy of one player's record.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::PlayerNotFound`] if `id` has not joined.
    pub async fn player(&self, id: PlayerId) -> Result<PlayerRecord, GameError> {
        self.registry
            .lock()
            .await
            .get(id)
            .cloned()
            .ok_or(GameError::PlayerNotFound(id))
    }

    /// Returns every joined player plus the team counts.
    pub async fn roster(&self) -> RosterSnapshot {
        let registry = self.registry.lock().await;
        RosterSnapshot {
            players: registry.players(),
            team_counts: registry.team_counts(),
            max_players: registry.max_players(),
        }
    }

    /// Current per-team head count.
    pub async fn team_counts(&self) -> TeamCounts {
        self.registry.lock().await.team_counts()
    }
}
