use crate::{
    AlertDispatcher, ChannelBroadcaster, ConnectionConfig, ConnectionId, ConnectionRateLimiter,
    Metrics, Result as WsErrorResult, ShutdownGuard, WsError,
};

use sa_core::{ClientMessage, ErrorLocation, ServerMessage};

use std::panic::Location;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use tokio::sync::{broadcast, mpsc};
use tokio::time::{Instant, MissedTickBehavior, interval};

/// Manages a single browser source connection
pub struct WebSocketConnection {
    connection_id: ConnectionId,
    channel: String,
    config: ConnectionConfig,
    metrics: Metrics,
    rate_limiter: ConnectionRateLimiter,
    broadcaster: ChannelBroadcaster,
    dispatcher: AlertDispatcher,
    last_seen: Instant,
}

impl WebSocketConnection {
    pub fn new(
        connection_id: ConnectionId,
        channel: String,
        config: ConnectionConfig,
        metrics: Metrics,
        rate_limiter: ConnectionRateLimiter,
        dispatcher: AlertDispatcher,
        broadcaster: ChannelBroadcaster,
    ) -> Self {
        Self {
            connection_id,
            channel,
            config,
            metrics,
            rate_limiter,
            broadcaster,
            dispatcher,
            last_seen: Instant::now(),
        }
    }

    /// Run the connection until the client leaves, goes silent, or the server stops
    pub async fn handle(
        mut self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        info!(
            "WebSocket connection {} established on channel '{}'",
            self.connection_id, self.channel
        );

        self.metrics.connection_established();

        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Bounded outbound queue so a slow client cannot grow memory
        let (tx, mut rx) = mpsc::channel::<Message>(self.config.send_buffer_size);

        // Subscribe before announcing so no alert slips between the two
        let mut broadcast_rx = self.broadcaster.subscribe(&self.channel).await;

        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let mut heartbeat = interval(self.config.heartbeat_interval());
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        heartbeat.tick().await;

        let connected = ServerMessage::Connected {
            client_id: self.connection_id.to_string(),
        };

        let result = match self.send(&tx, &connected).await {
            Err(e) => Err(e),
            Ok(()) => loop {
                tokio::select! {
                    msg = ws_receiver.next() => {
                        match msg {
                            Some(Ok(msg)) => {
                                self.last_seen = Instant::now();
                                match self.handle_client_message(msg, &tx).await {
                                    Ok(true) => {}
                                    Ok(false) => break Ok(()),
                                    Err(e) => {
                                        error!(
                                            "Error handling message from connection {}: {e}",
                                            self.connection_id
                                        );
                                        self.metrics.error_occurred(e.kind());
                                        break Err(e);
                                    }
                                }
                            }
                            Some(Err(e)) => {
                                warn!("WebSocket error on connection {}: {e}", self.connection_id);
                                break Err(WsError::ConnectionClosed {
                                    reason: format!("WebSocket error: {e}"),
                                    location: ErrorLocation::from(Location::caller()),
                                });
                            }
                            None => {
                                info!("Connection {} closed by client", self.connection_id);
                                break Ok(());
                            }
                        }
                    }

                    broadcast_msg = broadcast_rx.recv() => {
                        match broadcast_msg {
                            Ok(msg) => {
                                if let Err(e) = self.send(&tx, &msg).await {
                                    warn!(
                                        "Could not forward {} to connection {}: {e}",
                                        msg.message_type(),
                                        self.connection_id
                                    );
                                    self.metrics.error_occurred(e.kind());
                                    break Err(e);
                                }
                            }
                            Err(broadcast::error::RecvError::Lagged(missed)) => {
                                warn!(
                                    "Connection {} lagged, missed {missed} messages",
                                    self.connection_id
                                );
                                self.metrics.error_occurred("broadcast_lagged");
                            }
                            Err(broadcast::error::RecvError::Closed) => {
                                info!("Broadcast channel closed for connection {}", self.connection_id);
                                break Ok(());
                            }
                        }
                    }

                    _ = heartbeat.tick() => {
                        if self.last_seen.elapsed() > self.config.heartbeat_timeout() {
                            warn!(
                                "Connection {} silent for more than {}s, closing",
                                self.connection_id, self.config.heartbeat_timeout_secs
                            );
                            break Err(WsError::HeartbeatTimeout {
                                timeout_secs: self.config.heartbeat_timeout_secs,
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                        // Browsers answer protocol pings on their own
                        let _ = tx.try_send(Message::Ping(Bytes::new()));
                    }

                    _ = shutdown_guard.wait() => {
                        info!("Shutting down connection {} gracefully", self.connection_id);
                        let _ = tx.try_send(Message::Close(None));
                        break Ok(());
                    }
                }
            },
        };

        self.broadcaster.unsubscribe(&self.channel).await;
        drop(tx); // Closing the queue ends the send task
        let _ = send_task.await;

        self.metrics
            .connection_closed(if result.is_ok() { "normal" } else { "error" });

        info!(
            "WebSocket connection {} closed on channel '{}'",
            self.connection_id, self.channel
        );

        result
    }

    /// Returns `Ok(false)` when the client asked to close
    async fn handle_client_message(
        &mut self,
        msg: Message,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<bool> {
        match msg {
            Message::Text(text) => {
                if let Err(e) = self.rate_limiter.check() {
                    warn!("Dropping message from connection {}: {e}", self.connection_id);
                    self.metrics.error_occurred(e.kind());
                    return Ok(true);
                }
                self.handle_text_message(text.as_str(), tx).await?;
                Ok(true)
            }
            Message::Binary(data) => {
                debug!(
                    "Ignoring binary message ({} bytes) from connection {}",
                    data.len(),
                    self.connection_id
                );
                Ok(true)
            }
            Message::Ping(data) => {
                tx.send(Message::Pong(data))
                    .await
                    .map_err(|_| WsError::SendBufferFull {
                        location: ErrorLocation::from(Location::caller()),
                    })?;
                Ok(true)
            }
            Message::Pong(_) => Ok(true),
            Message::Close(_) => {
                info!("Received close frame from connection {}", self.connection_id);
                Ok(false)
            }
        }
    }

    async fn handle_text_message(
        &mut self,
        text: &str,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<()> {
        let message = match ClientMessage::from_json(text) {
            Ok(message) => message,
            Err(e) => {
                // Malformed frames are not fatal
                let err = WsError::InvalidMessage {
                    message: e.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                };
                warn!("Ignoring message from connection {}: {err}", self.connection_id);
                self.metrics.error_occurred(err.kind());
                return Ok(());
            }
        };

        self.metrics.message_received(message.message_type());

        match message {
            ClientMessage::Ping => self.send(tx, &ServerMessage::Pong).await,
            ClientMessage::TestAlert => {
                self.dispatcher.test_alert(&self.channel).await;
                Ok(())
            }
        }
    }

    /// Queue a message for the client, waiting for buffer space
    async fn send(&self, tx: &mpsc::Sender<Message>, message: &ServerMessage) -> WsErrorResult<()> {
        let json = message.to_json()?;
        tx.send(Message::Text(json.into()))
            .await
            .map_err(|_| WsError::ConnectionClosed {
                reason: "send queue closed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;
        self.metrics.message_sent(message.message_type());
        Ok(())
    }
}
