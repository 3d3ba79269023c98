use sa_config::Config;
use sa_core::SessionState;
use sa_db::SqlitePool;
use sa_ws::{
    AlertDispatcher, AppState, BroadcastConfig, ChannelBroadcaster, ConnectionConfig,
    ConnectionLimits, ConnectionRegistry, Metrics, RateLimiterFactory, ShutdownCoordinator,
};

/// Wire the transport, dispatcher and session from loaded configuration
pub fn build_app_state(config: &Config, pool: SqlitePool) -> AppState {
    let metrics = Metrics::new();
    let broadcaster = ChannelBroadcaster::new(BroadcastConfig::from(&config.websocket));
    let dispatcher = AlertDispatcher::new(pool, broadcaster.clone(), metrics.clone());

    AppState {
        session: SessionState::new(config.server.owner_id.clone()),
        dispatcher,
        broadcaster,
        rate_limiter_factory: RateLimiterFactory::new(config.rate_limit.clone()),
        registry: ConnectionRegistry::new(ConnectionLimits::from(&config.server)),
        metrics,
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::from(&config.websocket),
    }
}
