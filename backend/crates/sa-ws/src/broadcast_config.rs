use sa_config::WebSocketConfig;

/// Configuration for per-channel broadcast queues
#[derive(Debug, Clone)]
pub struct BroadcastConfig {
    /// Messages buffered per channel before slow subscribers start lagging
    pub channel_capacity: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
        }
    }
}

impl From<&WebSocketConfig> for BroadcastConfig {
    fn from(config: &WebSocketConfig) -> Self {
        Self {
            channel_capacity: config.broadcast_capacity,
        }
    }
}
