use crate::{
    AlertDispatcher, ChannelBroadcaster, ConnectionConfig, ConnectionRateLimiter,
    ConnectionRegistry, Metrics, RateLimiterFactory, ShutdownCoordinator, WebSocketConnection,
};

use sa_core::{DEFAULT_CHANNEL_NAME, SessionState, validate_channel_name};

use axum::{
    extract::{
        Query, State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::Response,
};
use log::{debug, error, warn};
use serde::Deserialize;

/// Shared state for the alert transport
#[derive(Clone)]
pub struct AppState {
    pub session: SessionState,
    pub dispatcher: AlertDispatcher,
    pub broadcaster: ChannelBroadcaster,
    pub rate_limiter_factory: RateLimiterFactory,
    pub registry: ConnectionRegistry,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

/// Query string of `GET /ws`
#[derive(Debug, Default, Deserialize)]
pub struct WsParams {
    pub channel: Option<String>,
}

impl WsParams {
    /// The requested channel, `default` when absent or blank
    pub fn channel_name(&self) -> &str {
        match self.channel.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_CHANNEL_NAME,
        }
    }
}

/// WebSocket upgrade handler for `GET /ws?channel=<name>`
pub async fn handler(
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let channel = params.channel_name().to_string();

    validate_channel_name(&channel).map_err(|e| {
        warn!("Rejected WebSocket upgrade: {e}");
        state.metrics.connection_rejected("invalid_channel");
        StatusCode::BAD_REQUEST
    })?;

    debug!("WebSocket upgrade request for channel '{channel}'");

    if !state.registry.has_capacity().await {
        warn!("Rejected WebSocket upgrade: connection limit reached");
        state.metrics.connection_rejected("limit");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    let rate_limiter = state.rate_limiter_factory.create();

    // Registration waits for a completed upgrade
    Ok(ws
        .on_failed_upgrade(|e| warn!("WebSocket upgrade failed: {e}"))
        .on_upgrade(move |socket| handle_socket(socket, channel, state, rate_limiter)))
}

async fn handle_socket(
    socket: WebSocket,
    channel: String,
    state: AppState,
    rate_limiter: ConnectionRateLimiter,
) {
    let connection_id = match state.registry.register(&channel).await {
        Ok(connection_id) => connection_id,
        Err(e) => {
            error!("Failed to register connection: {e}");
            state.metrics.connection_rejected("limit");
            return;
        }
    };

    let shutdown_guard = state.shutdown.subscribe_guard();

    let connection = WebSocketConnection::new(
        connection_id,
        channel,
        state.config.clone(),
        state.metrics.clone(),
        rate_limiter,
        state.dispatcher.clone(),
        state.broadcaster.clone(),
    );

    let result = connection.handle(socket, shutdown_guard).await;

    state.registry.unregister(connection_id).await;

    if let Err(e) = result {
        error!("Connection {connection_id} error: {e}");
    }
}
