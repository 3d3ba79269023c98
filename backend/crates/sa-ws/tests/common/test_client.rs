use sa_core::{ClientMessage, ServerMessage};

use axum_test::{TestServer, TestWebSocket};

/// Browser source stand-in
pub struct WsTestClient {
    ws: TestWebSocket,
    pub client_id: String,
}

impl WsTestClient {
    /// Connect to `channel` (or the default channel) and consume the `connected` greeting
    pub async fn connect(server: &TestServer, channel: Option<&str>) -> Self {
        let mut request = server.get_websocket("/ws");
        if let Some(channel) = channel {
            request = request.add_query_param("channel", channel);
        }

        let mut ws = request.await.into_websocket().await;

        let greeting: ServerMessage = ws.receive_json().await;
        let ServerMessage::Connected { client_id } = greeting else {
            panic!("expected connected as the first message, got {greeting:?}");
        };

        Self { ws, client_id }
    }

    pub async fn send(&mut self, message: ClientMessage) {
        self.ws.send_json(&message).await;
    }

    pub async fn send_text(&mut self, text: impl std::fmt::Display) {
        self.ws.send_text(text).await;
    }

    pub async fn receive(&mut self) -> ServerMessage {
        self.ws.receive_json().await
    }

    pub async fn close(self) {
        self.ws.close().await;
    }
}
