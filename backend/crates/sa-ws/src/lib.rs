pub mod app_state;
pub mod broadcast_config;
pub mod channel_broadcaster;
pub mod connection_config;
pub mod connection_id;
pub mod connection_info;
pub mod connection_limits;
pub mod connection_registry;
pub mod dispatch_outcome;
pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod rate_limiter;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod web_socket_connection;

pub use app_state::{AppState, WsParams, handler};
pub use broadcast_config::BroadcastConfig;
pub use channel_broadcaster::ChannelBroadcaster;
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_info::ConnectionInfo;
pub use connection_limits::ConnectionLimits;
pub use connection_registry::ConnectionRegistry;
pub use dispatch_outcome::DispatchOutcome;
pub use dispatcher::AlertDispatcher;
pub use error::{Result, WsError};
pub use metrics::Metrics;
pub use rate_limiter::{ConnectionRateLimiter, RateLimiterFactory};
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use web_socket_connection::WebSocketConnection;

#[cfg(test)]
mod tests;
