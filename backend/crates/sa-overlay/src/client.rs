use crate::{IntervalTimer, OverlayError, ReconnectPolicy, RenderQueueHandle, Result};

use sa_core::{ClientMessage, ServerMessage};

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use url::Url;

pub const DEFAULT_PING_INTERVAL: Duration = Duration::from_secs(30);

/// Where and how the overlay connects
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// WebSocket endpoint, e.g. `ws://127.0.0.1:8080/ws`
    pub server: Url,
    /// Channel to subscribe to; the server's default when `None`
    pub channel: Option<String>,
    pub ping_interval: Duration,
    /// Ask for a test alert after every successful connect
    pub request_test_alert: bool,
}

impl ClientConfig {
    pub fn new(server: &str, channel: Option<String>) -> Result<Self> {
        let server = Url::parse(server).map_err(|e| OverlayError::url(server, e))?;
        Ok(Self {
            server,
            channel,
            ping_interval: DEFAULT_PING_INTERVAL,
            request_test_alert: false,
        })
    }

    /// Endpoint with the channel query parameter applied
    pub fn connect_url(&self) -> Url {
        let mut url = self.server.clone();
        if let Some(channel) = self.channel.as_deref().map(str::trim)
            && !channel.is_empty()
        {
            url.query_pairs_mut().append_pair("channel", channel);
        }
        url
    }
}

/// Keeps a browser-source connection alive and feeds its alerts to the render loop.
///
/// The render queue belongs to the client, not the socket, so alerts still
/// waiting to render survive a reconnect.
pub struct OverlayClient {
    config: ClientConfig,
    queue: RenderQueueHandle,
    policy: ReconnectPolicy,
    client_id: Option<String>,
}

impl OverlayClient {
    pub fn new(config: ClientConfig, queue: RenderQueueHandle) -> Self {
        Self {
            config,
            queue,
            policy: ReconnectPolicy::default(),
            client_id: None,
        }
    }

    pub fn with_reconnect_policy(mut self, policy: ReconnectPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Id the server assigned on the current or most recent connection
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// Connect, read until the connection drops, back off, repeat.
    ///
    /// Only returns if the render loop has gone away.
    pub async fn run(&mut self) {
        loop {
            match self.run_session().await {
                Ok(()) => info!("Connection to {} closed", self.config.server),
                Err(OverlayError::RenderLoopStopped { .. }) => {
                    warn!("Render loop has stopped, disconnecting");
                    return;
                }
                Err(e) => warn!("Connection to {} lost: {e}", self.config.server),
            }

            let delay = self.policy.next_delay();
            info!(
                "Reconnecting in {}ms (attempt {})",
                delay.as_millis(),
                self.policy.attempts()
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// One connection from connect to close
    pub async fn run_session(&mut self) -> Result<()> {
        let url = self.config.connect_url();
        debug!("Connecting to {url}");

        let (stream, _response) =
            connect_async(url.as_str())
                .await
                .map_err(|source| OverlayError::Connect {
                    url: url.to_string(),
                    source,
                    location: ErrorLocation::from(Location::caller()),
                })?;
        self.policy.reset();

        let (mut write, mut read) = stream.split();
        let (outgoing_tx, mut outgoing_rx) = mpsc::unbounded_channel::<Message>();

        let ping = ClientMessage::Ping.to_json()?;
        let ping_tx = outgoing_tx.clone();
        let pinger = IntervalTimer::start(self.config.ping_interval, move || {
            let _ = ping_tx.send(Message::Text(ping.clone().into()));
        });

        if self.config.request_test_alert {
            let request = ClientMessage::TestAlert.to_json()?;
            let _ = outgoing_tx.send(Message::Text(request.into()));
        }

        let result = loop {
            tokio::select! {
                Some(outgoing) = outgoing_rx.recv() => {
                    if let Err(e) = write.send(outgoing).await {
                        break Err(e.into());
                    }
                }
                incoming = read.next() => match incoming {
                    Some(Ok(Message::Text(text))) => {
                        if let Err(e) = self.handle_text(text.as_str()) {
                            break Err(e);
                        }
                    }
                    Some(Ok(Message::Close(frame))) => {
                        debug!("Server closed the connection: {frame:?}");
                        break Ok(());
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(e.into()),
                    None => break Ok(()),
                },
            }
        };

        pinger.stop();
        result
    }

    /// Fails only when the render loop no longer accepts alerts
    fn handle_text(&mut self, text: &str) -> Result<()> {
        let message = match ServerMessage::from_json(text) {
            Ok(message) => message,
            Err(e) => {
                warn!("Ignoring malformed server message: {e}");
                return Ok(());
            }
        };

        match message {
            ServerMessage::Connected { client_id } => {
                info!(
                    "Connected as {client_id} on channel '{}'",
                    self.config.channel.as_deref().unwrap_or("default")
                );
                self.client_id = Some(client_id);
            }
            ServerMessage::Alert { payload } => {
                debug!("Alert received [{}]", payload.kinds().join(", "));
                if !self.queue.enqueue(payload) {
                    return Err(OverlayError::render_loop_stopped());
                }
            }
            ServerMessage::Pong => debug!("Pong"),
        }
        Ok(())
    }
}
