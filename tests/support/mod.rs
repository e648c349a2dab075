// Fake game server shared by the integration tests.
#![allow(dead_code)]

use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
    routing::get,
};
use futures::SinkExt;
use pong_client::interface_adapters::net::ConnectionSettings;
use pong_client::use_cases::ClientEvent;
use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;

pub const RECONNECT_DELAY: Duration = Duration::from_millis(50);
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const EVENT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Default)]
pub struct Behavior {
    // Close the first connection right after greeting it.
    pub drop_first: bool,
    // Send an unparsable frame before the state message.
    pub send_garbage: bool,
}

#[derive(Clone)]
struct FakeState {
    behavior: Behavior,
    connections: Arc<AtomicUsize>,
    received_tx: mpsc::UnboundedSender<String>,
}

pub struct FakeServer {
    pub addr: SocketAddr,
    pub connections: Arc<AtomicUsize>,
    pub received: mpsc::UnboundedReceiver<String>,
}

impl FakeServer {
    pub fn url(&self) -> url::Url {
        url::Url::parse(&format!("ws://{}/", self.addr)).expect("valid test url")
    }

    pub fn settings(&self) -> ConnectionSettings {
        ConnectionSettings {
            url: self.url(),
            reconnect_delay: RECONNECT_DELAY,
            connect_timeout: CONNECT_TIMEOUT,
        }
    }

    pub async fn next_received(&mut self) -> serde_json::Value {
        let text = tokio::time::timeout(EVENT_TIMEOUT, self.received.recv())
            .await
            .expect("server should receive a message in time")
            .expect("server channel open");
        serde_json::from_str(&text).expect("client sent valid json")
    }
}

pub fn state_json(left_y: f64, game_over: bool, winner: Option<&str>) -> String {
    serde_json::json!({
        "type": "state",
        "state": {
            "width": 640,
            "height": 480,
            "paddle_w": 10,
            "paddle_h": 60,
            "ball_size": 16,
            "left_y": left_y,
            "right_y": 210.0,
            "ball_x": 312.0,
            "ball_y": 232.0,
            "score_left": 4,
            "score_right": 2,
            "game_over": game_over,
            "winner": winner
        }
    })
    .to_string()
}

pub async fn spawn_server(behavior: Behavior) -> FakeServer {
    // Bind to an ephemeral port to avoid collisions with local services.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    serve_on(listener, behavior)
}

pub fn serve_on(listener: tokio::net::TcpListener, behavior: Behavior) -> FakeServer {
    let addr = listener.local_addr().expect("get local addr");
    let connections = Arc::new(AtomicUsize::new(0));
    let (received_tx, received) = mpsc::unbounded_channel();

    let state = FakeState {
        behavior,
        connections: connections.clone(),
        received_tx,
    };
    let app = Router::new().route("/", get(ws_handler)).with_state(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake server failed");
    });

    FakeServer {
        addr,
        connections,
        received,
    }
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<FakeState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: FakeState) {
    let n = state.connections.fetch_add(1, Ordering::SeqCst) + 1;
    let role = if n == 1 { "left" } else { "right" };

    let greeting = serde_json::json!({"type": "role", "role": role}).to_string();
    let _ = socket.send(Message::Text(greeting.into())).await;
    if state.behavior.send_garbage {
        let _ = socket.send(Message::Text("{not json".into())).await;
        let _ = socket
            .send(Message::Text(r#"{"type":"chat","text":"hi"}"#.into()))
            .await;
    }
    let _ = socket
        .send(Message::Text(state_json(100.0 + n as f64, false, None).into()))
        .await;

    if state.behavior.drop_first && n == 1 {
        let _ = socket.send(Message::Close(None)).await;
        let _ = socket.close().await;
        return;
    }

    while let Some(Ok(msg)) = socket.recv().await {
        if let Message::Text(text) = msg {
            let _ = state.received_tx.send(text.as_str().to_owned());
        }
    }
}

pub async fn next_event(events_rx: &mut mpsc::Receiver<ClientEvent>) -> ClientEvent {
    tokio::time::timeout(EVENT_TIMEOUT, events_rx.recv())
        .await
        .expect("client event should arrive in time")
        .expect("connection manager still running")
}
