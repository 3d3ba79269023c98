use sa_core::{AlertPayload, ClientMessage, Position, ServerMessage, TextAlert};

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
    routing::get,
};

/// Text-only alert that renders in 50ms
pub fn short_alert(content: &str) -> ServerMessage {
    ServerMessage::Alert {
        payload: AlertPayload {
            text: Some(TextAlert {
                content: content.to_string(),
                duration: 50,
                position: Position::Center,
                style: None,
            }),
            ..Default::default()
        },
    }
}

/// What the fake alert server saw from the overlay
#[derive(Clone, Default)]
pub struct ServerLog {
    pub channels: Arc<Mutex<Vec<Option<String>>>>,
    pub received: Arc<Mutex<Vec<ClientMessage>>>,
}

impl ServerLog {
    pub fn channels(&self) -> Vec<Option<String>> {
        self.channels.lock().unwrap().clone()
    }

    pub fn received(&self) -> Vec<ClientMessage> {
        self.received.lock().unwrap().clone()
    }
}

/// Minimal stand-in for the alert server.
///
/// Every connection gets `connected`, then one alert per entry of `alerts`,
/// then answers pings and test-alert requests until the client leaves or
/// `close_after_alerts` is set.
pub async fn spawn_fake_server(
    alerts: Vec<ServerMessage>,
    close_after_alerts: bool,
) -> (SocketAddr, ServerLog) {
    let log = ServerLog::default();
    let state = FakeServer {
        alerts: Arc::new(alerts),
        close_after_alerts,
        log: log.clone(),
    };

    let app = Router::new().route("/ws", get(upgrade)).with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, log)
}

#[derive(Clone)]
struct FakeServer {
    alerts: Arc<Vec<ServerMessage>>,
    close_after_alerts: bool,
    log: ServerLog,
}

async fn upgrade(
    State(state): State<FakeServer>,
    Query(params): Query<HashMap<String, String>>,
    ws: WebSocketUpgrade,
) -> Response {
    state
        .log
        .channels
        .lock()
        .unwrap()
        .push(params.get("channel").cloned());
    ws.on_upgrade(move |socket| serve(socket, state))
}

async fn serve(mut socket: WebSocket, state: FakeServer) {
    let connected = ServerMessage::Connected {
        client_id: format!("fake-{}", state.log.channels().len()),
    };
    if send(&mut socket, &connected).await.is_err() {
        return;
    }

    for alert in state.alerts.iter() {
        if send(&mut socket, alert).await.is_err() {
            return;
        }
    }

    if state.close_after_alerts {
        let _ = socket.send(Message::Close(None)).await;
        return;
    }

    while let Some(Ok(message)) = socket.recv().await {
        let Message::Text(text) = message else {
            continue;
        };
        let Ok(request) = ClientMessage::from_json(text.as_str()) else {
            continue;
        };
        state.log.received.lock().unwrap().push(request);

        let reply = match request {
            ClientMessage::Ping => ServerMessage::Pong,
            ClientMessage::TestAlert => short_alert("test"),
        };
        if send(&mut socket, &reply).await.is_err() {
            return;
        }
    }
}

async fn send(socket: &mut WebSocket, message: &ServerMessage) -> Result<(), axum::Error> {
    let json = message.to_json().unwrap();
    socket.send(Message::Text(json.into())).await
}
