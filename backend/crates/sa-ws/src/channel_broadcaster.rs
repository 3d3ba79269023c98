use crate::BroadcastConfig;

use sa_core::ServerMessage;

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::{RwLock, broadcast};

/// Fans server messages out to every connection of a browser source channel
pub struct ChannelBroadcaster {
    inner: Arc<RwLock<BroadcasterInner>>,
    config: BroadcastConfig,
}

struct BroadcasterInner {
    channels: HashMap<String, ChannelSender>,
}

struct ChannelSender {
    sender: broadcast::Sender<ServerMessage>,
    subscriber_count: usize,
}

impl ChannelBroadcaster {
    pub fn new(config: BroadcastConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BroadcasterInner {
                channels: HashMap::new(),
            })),
            config,
        }
    }

    /// Subscribe to a channel, creating its queue on first use
    pub async fn subscribe(&self, channel: &str) -> broadcast::Receiver<ServerMessage> {
        let mut inner = self.inner.write().await;

        let entry = inner
            .channels
            .entry(channel.to_string())
            .or_insert_with(|| {
                let (sender, _) = broadcast::channel(self.config.channel_capacity);
                info!("Created broadcast channel '{channel}'");
                ChannelSender {
                    sender,
                    subscriber_count: 0,
                }
            });

        entry.subscriber_count += 1;
        let receiver = entry.sender.subscribe();

        debug!(
            "Connection subscribed to '{channel}' ({} total subscribers)",
            entry.subscriber_count
        );

        receiver
    }

    /// Drop one subscription; the channel's queue goes with its last subscriber
    pub async fn unsubscribe(&self, channel: &str) {
        let mut inner = self.inner.write().await;

        if let Some(entry) = inner.channels.get_mut(channel) {
            entry.subscriber_count = entry.subscriber_count.saturating_sub(1);

            debug!(
                "Connection unsubscribed from '{channel}' ({} remaining subscribers)",
                entry.subscriber_count
            );

            if entry.subscriber_count == 0 {
                inner.channels.remove(channel);
                info!("Removed empty broadcast channel '{channel}'");
            }
        }
    }

    /// Send a message to every current subscriber of `channel`.
    ///
    /// Returns the number of receivers reached; 0 when nobody listens.
    pub async fn broadcast(&self, channel: &str, message: ServerMessage) -> usize {
        let inner = self.inner.read().await;

        let Some(entry) = inner.channels.get(channel) else {
            debug!("No subscribers on '{channel}', dropping {}", message.message_type());
            return 0;
        };

        match entry.sender.send(message) {
            Ok(receivers) => {
                debug!("Broadcast to '{channel}' ({receivers} receivers)");
                receivers
            }
            Err(_) => {
                debug!("Broadcast to '{channel}' had no active receivers");
                0
            }
        }
    }

    pub async fn subscriber_count(&self, channel: &str) -> usize {
        let inner = self.inner.read().await;
        inner
            .channels
            .get(channel)
            .map(|c| c.subscriber_count)
            .unwrap_or(0)
    }

    /// Channels with at least one subscriber
    pub async fn active_channels(&self) -> Vec<String> {
        let inner = self.inner.read().await;
        inner.channels.keys().cloned().collect()
    }

    pub async fn channel_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.channels.len()
    }
}

impl Clone for ChannelBroadcaster {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            config: self.config.clone(),
        }
    }
}
