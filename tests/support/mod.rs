// In-process stand-in for the game backend: trigger websocket plus score routes.
#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};
use tokio::sync::{broadcast, mpsc, watch};

pub const GOOD_TOKEN: &str = "good-token";

struct FakeState {
    // Each push fans out one frame to every connected socket.
    push_tx: broadcast::Sender<Message>,
    // Text frames received from clients.
    client_msgs_tx: mpsc::UnboundedSender<String>,
    // Number of currently open sockets.
    connections_tx: watch::Sender<usize>,
    recorded: Mutex<Vec<Value>>,
    leaderboard: Mutex<Result<Value, StatusCode>>,
}

pub struct FakeBackend {
    pub base_url: String,
    pub ws_url: String,
    state: Arc<FakeState>,
    client_msgs_rx: mpsc::UnboundedReceiver<String>,
    connections_rx: watch::Receiver<usize>,
}

impl FakeBackend {
    // Bind to an ephemeral port and serve on the current test runtime.
    pub async fn start() -> Self {
        let (push_tx, _) = broadcast::channel(16);
        let (client_msgs_tx, client_msgs_rx) = mpsc::unbounded_channel();
        let (connections_tx, connections_rx) = watch::channel(0usize);
        let state = Arc::new(FakeState {
            push_tx,
            client_msgs_tx,
            connections_tx,
            recorded: Mutex::new(Vec::new()),
            leaderboard: Mutex::new(Ok(json!([]))),
        });

        let app = Router::new()
            .route("/ws", get(ws_route))
            .route("/api/score/record", post(record_route))
            .route("/api/leaderboard", get(leaderboard_route))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral test port");
        let addr = listener.local_addr().expect("get local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            ws_url: format!("ws://{addr}/ws"),
            state,
            client_msgs_rx,
            connections_rx,
        }
    }

    pub fn set_leaderboard(&self, board: Result<Value, StatusCode>) {
        *self.state.leaderboard.lock().expect("leaderboard mutex") = board;
    }

    pub fn push_shoot(&self) {
        let shoot = json!({ "type": "shoot" }).to_string();
        self.push_raw(Message::Text(shoot.into()));
    }

    // Sends any frame as-is, well-formed or not.
    pub fn push_raw(&self, msg: Message) {
        let _ = self.state.push_tx.send(msg);
    }

    pub fn recorded_scores(&self) -> Vec<Value> {
        self.state.recorded.lock().expect("recorded mutex").clone()
    }

    // Wait until exactly `n` sockets are open.
    pub async fn wait_for_connections(&mut self, n: usize) {
        tokio::time::timeout(
            Duration::from_secs(5),
            self.connections_rx.wait_for(|count| *count == n),
        )
        .await
        .expect("connection count not reached in time")
        .expect("connection watch closed");
    }

    pub async fn next_client_message(&mut self) -> Value {
        let txt = tokio::time::timeout(Duration::from_secs(5), self.client_msgs_rx.recv())
            .await
            .expect("no client message in time")
            .expect("client message channel closed");
        serde_json::from_str(&txt).expect("client sent json")
    }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {GOOD_TOKEN}"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "invalid token" })),
    )
        .into_response()
}

async fn ws_route(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(state): State<Arc<FakeState>>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<FakeState>) {
    // Subscribe before announcing the connection so no push is missed.
    let mut push_rx = state.push_tx.subscribe();
    state.connections_tx.send_modify(|c| *c += 1);

    let status = json!({ "type": "status", "data": { "msg": "connected" } }).to_string();
    let _ = socket.send(Message::Text(status.into())).await;

    loop {
        tokio::select! {
            pushed = push_rx.recv() => {
                let Ok(msg) = pushed else {
                    break;
                };
                if socket.send(msg).await.is_err() {
                    break;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let _ = state.client_msgs_tx.send(text.as_str().to_string());
                    }
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.connections_tx.send_modify(|c| *c -= 1);
}

async fn record_route(
    headers: HeaderMap,
    State(state): State<Arc<FakeState>>,
    Json(body): Json<Value>,
) -> Response {
    if !authorized(&headers) {
        return unauthorized();
    }
    state.recorded.lock().expect("recorded mutex").push(body);
    (StatusCode::OK, Json(json!({ "message": "saved" }))).into_response()
}

async fn leaderboard_route(State(state): State<Arc<FakeState>>) -> Response {
    let board = state.leaderboard.lock().expect("leaderboard mutex").clone();
    match board {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(status) => (status, Json(json!({ "error": "store offline" }))).into_response(),
    }
}
