//! Top-level router: REST API, WebSocket endpoint, static client assets.

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::AppState;
use crate::ws::handler::ws_handler;

/// Builds the full application.
///
/// When `static_dir` is configured, unmatched paths are served from it and
/// `/` resolves to its `index.html`.
pub fn build_app(state: AppState) -> Router {
    let mut router = Router::new()
        .merge(api::build_router())
        .route("/ws", get(ws_handler));

    if let Some(dir) = state.config.static_dir.as_ref() {
        tracing::info!(dir = %dir.display(), "serving static client assets");
        let assets = ServeDir::new(dir).append_index_html_on_directories(true);
        router = router.fallback_service(assets);
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let Ok(req) = Request::builder().uri(uri).body(Body::empty()) else {
            panic!("invalid request");
        };
        let Ok(resp) = app.oneshot(req).await else {
            panic!("router failed");
        };
        let status = resp.status();
        let Ok(bytes) = to_bytes(resp.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let app = build_app(AppState::new(GameConfig::default()));
        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn empty_roster() {
        let app = build_app(AppState::new(GameConfig::default()));
        let (status, body) = get_json(app, "/api/v1/players").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["players"], serde_json::json!([]));
        assert_eq!(body["teamCounts"]["red"], 0);
        assert_eq!(body["maxPlayers"], 50);
    }

    #[tokio::test]
    async fn unknown_player_is_404() {
        let app = build_app(AppState::new(GameConfig::default()));
        let uri = format!("/api/v1/players/{}", uuid::Uuid::new_v4());
        let (status, body) = get_json(app, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], 2001);
    }

    #[tokio::test]
    async fn malformed_player_id_is_400() {
        let app = build_app(AppState::new(GameConfig::default()));
        let (status, _) = get_json(app, "/api/v1/players/not-a-uuid").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn team_stats_reflect_joins() {
        let state = AppState::new(GameConfig::default());
        let mut phase = crate::ws::session::SessionPhase::Unjoined;
        let joined = state
            .relay
            .join_game(
                crate::domain::PlayerId::new(),
                &mut phase,
                crate::ws::messages::JoinGame {
                    team: crate::domain::Team::Blue,
                    position: [0.0, 0.0, 0.0],
                    rotation: 0.0,
                },
            )
            .await;
        assert!(joined.is_ok());

        let app = build_app(state);
        let (status, body) = get_json(app, "/api/v1/teams").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["blue"], 1);
        assert_eq!(body["red"], 0);
        assert_eq!(body["total"], 1);
    }

    #[tokio::test]
    async fn static_dir_serves_index() {
        let dir = std::env::temp_dir().join(format!("paint-relay-{}", uuid::Uuid::new_v4()));
        let Ok(()) = std::fs::create_dir_all(&dir) else {
            panic!("could not create temp dir");
        };
        let Ok(()) = std::fs::write(dir.join("index.html"), "<html>paint</html>") else {
            panic!("could not write index.html");
        };
        let config = GameConfig {
            static_dir: Some(dir.clone()),
            ..GameConfig::default()
        };
        let app = build_app(AppState::new(config));

        let Ok(req) = Request::builder().uri("/").body(Body::empty()) else {
            panic!("invalid request");
        };
        let Ok(resp) = app.oneshot(req).await else {
            panic!("router failed");
        };
        assert_eq!(resp.status(), StatusCode::OK);
        let Ok(bytes) = to_bytes(resp.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        assert_eq!(&bytes[..], b"<html>paint</html>");

        let _ = std::fs::remove_dir_all(dir);
    }
}
