//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single WebSocket connection: inbound
//! frames are decoded and dispatched to the relay, with only position
//! updates subject to the rate limit; outbound deliveries addressed to
//! this connection are forwarded to the socket.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::ClientEvent;
use super::rate_limit::InputRateLimiter;
use super::session::SessionPhase;
use crate::domain::game_event::ConnectedPayload;
use crate::domain::{Delivery, PlayerId, ServerEvent};
use crate::error::GameError;
use crate::service::RelayService;

/// Runs one connection from upgrade to teardown.
///
/// `event_rx` must have been subscribed before the upgrade so no reply
/// to this connection can be missed. On exit, for whatever reason, the
/// relay's disconnect handler runs exactly once.
pub async fn run_connection(
    socket: WebSocket,
    player_id: PlayerId,
    mut event_rx: broadcast::Receiver<Delivery>,
    relay: Arc<RelayService>,
    input_rate_limit: u32,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let limiter = InputRateLimiter::new(input_rate_limit);
    let mut phase = SessionPhase::Unjoined;

    tracing::info!(%player_id, "connection opened");

    let welcome = ServerEvent::Connected(ConnectedPayload { id: player_id });
    if let Err(err) = send_event(&mut ws_tx, &welcome).await {
        tracing::debug!(%player_id, error = %err, "failed to send welcome");
        return;
    }

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        match ClientEvent::decode(text.as_str()) {
                            Ok(event) => {
                                if let ClientEvent::UpdatePosition(_) = event
                                    && let Err(err) = limiter.check()
                                {
                                    tracing::debug!(
                                        %player_id,
                                        error = %err,
                                        "position update dropped"
                                    );
                                    continue;
                                }
                                tracing::trace!(%player_id, event = event.name(), "inbound event");
                                relay.handle_event(player_id, &mut phase, event).await;
                            }
                            Err(err) => {
                                tracing::warn!(%player_id, error = %err, "malformed frame");
                                relay.reject(player_id, &err);
                            }
                        }
                    }
                    Some(Ok(Message::Binary(_))) => {
                        tracing::debug!(%player_id, "binary frame ignored");
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::debug!(%player_id, error = %err, "ws read error");
                        break;
                    }
                }
            }
            delivery = event_rx.recv() => {
                match delivery {
                    Ok(delivery) => {
                        if delivery.recipient.includes(player_id)
                            && send_event(&mut ws_tx, &delivery.event).await.is_err()
                        {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(%player_id, lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    relay.disconnect(player_id, phase).await;
    tracing::info!(%player_id, "connection closed");
}

/// Serializes and writes one event.
async fn send_event(
    ws_tx: &mut SplitSink<WebSocket, Message>,
    event: &ServerEvent,
) -> Result<(), GameError> {
    let json = serde_json::to_string(event).map_err(|e| GameError::Internal(e.to_string()))?;
    ws_tx
        .send(Message::text(json))
        .await
        .map_err(|e| GameError::Internal(e.to_string()))
}
