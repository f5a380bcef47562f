//! Axum WebSocket upgrade handler.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::response::IntoResponse;

use super::connection::run_connection;
use crate::app_state::AppState;
use crate::domain::PlayerId;

/// `GET /ws`: Upgrade HTTP connection to WebSocket.
///
/// Assigns the connection its [`PlayerId`] and subscribes it to the
/// event bus before the upgrade completes.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    let player_id = PlayerId::new();
    let event_rx = state.relay.event_bus().subscribe();
    let relay = Arc::clone(&state.relay);
    let input_rate_limit = state.config.input_rate_limit;

    ws.on_upgrade(move |socket| {
        run_connection(socket, player_id, event_rx, relay, input_rate_limit)
    })
}
