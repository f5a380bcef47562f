//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::dto::{PlayerDto, PlayerListResponse, TeamStatsResponse};
use crate::api::handlers;
use crate::domain::{Team, TeamCounts};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI description, served at `/api-docs/openapi.json` when
/// the `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "paint-relay",
        description = "Read-only roster endpoints for the paint tag relay. Gameplay runs over `/ws`."
    ),
    paths(
        handlers::system::health_handler,
        handlers::player::list_players,
        handlers::player::get_player,
        handlers::player::team_stats,
    ),
    components(schemas(
        PlayerDto,
        PlayerListResponse,
        TeamStatsResponse,
        Team,
        TeamCounts,
        ErrorResponse,
        ErrorBody,
        handlers::system::HealthResponse,
    )),
    tags(
        (name = "System", description = "Liveness"),
        (name = "Players", description = "Joined players and team balance"),
    )
)]
pub struct ApiDoc;
