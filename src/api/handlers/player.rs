//! Read-only roster handlers: list players, get one player, team stats.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{PlayerDto, PlayerListResponse, TeamStatsResponse};
use crate::app_state::AppState;
use crate::domain::PlayerId;
use crate::error::{ErrorResponse, GameError};

/// `GET /players`: List joined players and team counts.
#[utoipa::path(
    get,
    path = "/api/v1/players",
    tag = "Players",
    summary = "List joined players",
    description = "Returns every player currently holding a slot, oldest first, plus the per-team head count.",
    responses(
        (status = 200, description = "Current roster", body = PlayerListResponse),
    )
)]
pub async fn list_players(State(state): State<AppState>) -> impl IntoResponse {
    let roster = state.relay.roster().await;
    Json(PlayerListResponse {
        players: roster.players.into_iter().map(PlayerDto::from).collect(),
        team_counts: roster.team_counts,
        max_players: roster.max_players,
    })
}

/// `GET /players/{id}`: Get one player's record.
///
/// # Errors
///
/// Returns [`GameError::PlayerNotFound`] if the id has not joined.
#[utoipa::path(
    get,
    path = "/api/v1/players/{id}",
    tag = "Players",
    summary = "Get player",
    description = "Returns the last known state of one joined player.",
    params(
        ("id" = uuid::Uuid, Path, description = "Connection UUID"),
    ),
    responses(
        (status = 200, description = "Player record", body = PlayerDto),
        (status = 404, description = "Player not joined", body = ErrorResponse),
    )
)]
pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> Result<impl IntoResponse, GameError> {
    let record = state.relay.player(PlayerId::from_uuid(id)).await?;
    Ok(Json(PlayerDto::from(record)))
}

/// `GET /teams`: Team head counts and connection count.
#[utoipa::path(
    get,
    path = "/api/v1/teams",
    tag = "Players",
    summary = "Team statistics",
    description = "Returns the per-team head count, capacity, and number of open connections.",
    responses(
        (status = 200, description = "Team statistics", body = TeamStatsResponse),
    )
)]
pub async fn team_stats(State(state): State<AppState>) -> impl IntoResponse {
    let roster = state.relay.roster().await;
    let counts = roster.team_counts;
    Json(TeamStatsResponse {
        red: counts.red,
        blue: counts.blue,
        total: counts.total(),
        max_players: roster.max_players,
        connections: state.relay.event_bus().receiver_count(),
    })
}

/// Roster routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/players", get(list_players))
        .route("/players/{id}", get(get_player))
        .route("/teams", get(team_stats))
}
