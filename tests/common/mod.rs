//! Shared harness: an in-process relay on an ephemeral port and a thin
//! WebSocket client speaking the JSON event protocol.

#![allow(dead_code, clippy::panic, clippy::indexing_slicing, missing_docs)]

use std::net::SocketAddr;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use paint_relay::app_state::AppState;
use paint_relay::build_app;
use paint_relay::config::GameConfig;

/// How long to wait for a frame that should arrive.
pub const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// How long to wait before concluding nothing will arrive.
pub const QUIET_PERIOD: Duration = Duration::from_millis(150);

pub struct TestServer {
    pub addr: SocketAddr,
    _handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn new() -> Self {
        Self::from_config(GameConfig::default()).await
    }

    pub async fn with_max_players(max_players: usize) -> Self {
        Self::from_config(GameConfig {
            max_players,
            ..GameConfig::default()
        })
        .await
    }

    pub async fn from_config(config: GameConfig) -> Self {
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        let app = build_app(AppState::new(config));

        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                panic!("server error: {err}");
            }
        });

        Self {
            addr,
            _handle: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Opens a connection and consumes its `connected` frame.
    pub async fn connect(&self) -> TestClient {
        let Ok((ws, _)) = tokio_tungstenite::connect_async(self.ws_url()).await else {
            panic!("websocket connect failed");
        };
        let mut client = TestClient {
            ws,
            id: String::new(),
        };
        let welcome = client.recv().await;
        assert_eq!(welcome["event"], "connected");
        let Some(id) = welcome["data"]["id"].as_str() else {
            panic!("connected frame without id: {welcome}");
        };
        client.id = id.to_string();
        client
    }

    /// Opens a connection and joins `team`, consuming the `currentPlayers`
    /// reply, which is returned.
    pub async fn join(&self, team: &str) -> (TestClient, Value) {
        let mut client = self.connect().await;
        client.join(team, [0.0, 0.0, 0.0], 0.0).await;
        let snapshot = client.recv_event("currentPlayers").await;
        (client, snapshot)
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, Value) {
        let Ok(resp) = reqwest::get(format!("{}{path}", self.base_url())).await else {
            panic!("GET {path} failed");
        };
        let status = resp.status();
        let Ok(body) = resp.json::<Value>().await else {
            panic!("GET {path} returned non-JSON");
        };
        (status, body)
    }
}

pub struct TestClient {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
    pub id: String,
}

impl TestClient {
    pub async fn send(&mut self, frame: Value) {
        self.send_raw(frame.to_string()).await;
    }

    pub async fn send_raw(&mut self, text: String) {
        if let Err(err) = self.ws.send(Message::text(text)).await {
            panic!("send failed: {err}");
        }
    }

    pub async fn join(&mut self, team: &str, position: [f64; 3], rotation: f64) {
        self.send(json!({
            "event": "joinGame",
            "data": { "team": team, "position": position, "rotation": rotation }
        }))
        .await;
    }

    pub async fn update_position(&mut self, position: [f64; 3], rotation: f64, animation: Value) {
        self.send(json!({
            "event": "updatePosition",
            "data": { "position": position, "rotation": rotation, "animationState": animation }
        }))
        .await;
    }

    pub async fn paint(&mut self, position: [f64; 3], normal: [f64; 3], team: &str) {
        self.send(json!({
            "event": "paintSurface",
            "data": { "position": position, "normal": normal, "team": team }
        }))
        .await;
    }

    pub async fn hit(&mut self, target: &str, position: [f64; 3], projectile_team: &str) {
        self.send(json!({
            "event": "playerHit",
            "data": {
                "hitPlayerId": target,
                "position": position,
                "projectileTeam": projectile_team
            }
        }))
        .await;
    }

    /// Next text frame as JSON, failing after [`RECV_TIMEOUT`].
    pub async fn recv(&mut self) -> Value {
        loop {
            let Ok(next) = tokio::time::timeout(RECV_TIMEOUT, self.ws.next()).await else {
                panic!("timed out waiting for a frame");
            };
            match next {
                Some(Ok(Message::Text(text))) => {
                    let Ok(value) = serde_json::from_str(text.as_str()) else {
                        panic!("server sent invalid JSON: {text}");
                    };
                    return value;
                }
                Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
                other => panic!("unexpected frame: {other:?}"),
            }
        }
    }

    /// Next frame, asserting its event name; returns its `data`.
    pub async fn recv_event(&mut self, name: &str) -> Value {
        let frame = self.recv().await;
        assert_eq!(frame["event"], name, "unexpected frame {frame}");
        frame["data"].clone()
    }

    /// Asserts that no text frame arrives within [`QUIET_PERIOD`].
    pub async fn expect_silence(&mut self) {
        if let Ok(Some(Ok(Message::Text(text)))) =
            tokio::time::timeout(QUIET_PERIOD, self.ws.next()).await
        {
            panic!("expected no frame, got {text}");
        }
    }

    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }
}
