use crate::{ChannelBroadcaster, DispatchOutcome, Metrics, Result as WsErrorResult};

use sa_core::{EventOccurrence, ServerMessage, compose, compose_test_alert};
use sa_db::{BrowserSourceChannelRepository, EventActionRepository, SqlitePool};

use std::sync::Arc;

use log::{debug, info};

/// Turns event occurrences into alerts on the right browser source channel.
///
/// Lookup, compose, resolve and broadcast; store failures are returned to
/// the caller and never reach a viewer.
#[derive(Clone)]
pub struct AlertDispatcher {
    actions: Arc<EventActionRepository>,
    channels: Arc<BrowserSourceChannelRepository>,
    broadcaster: ChannelBroadcaster,
    metrics: Metrics,
}

impl AlertDispatcher {
    pub fn new(pool: SqlitePool, broadcaster: ChannelBroadcaster, metrics: Metrics) -> Self {
        Self {
            actions: Arc::new(EventActionRepository::new(pool.clone())),
            channels: Arc::new(BrowserSourceChannelRepository::new(pool)),
            broadcaster,
            metrics,
        }
    }

    pub async fn dispatch(&self, occurrence: &EventOccurrence) -> WsErrorResult<DispatchOutcome> {
        let outcome = self.route(occurrence).await?;

        self.metrics.alert_dispatched(outcome.as_str());
        debug!(
            "Dispatched {} for owner {}: {}",
            occurrence.event_type,
            occurrence.owner_id,
            outcome.as_str()
        );

        Ok(outcome)
    }

    async fn route(&self, occurrence: &EventOccurrence) -> WsErrorResult<DispatchOutcome> {
        let Some(action) = self
            .actions
            .lookup(&occurrence.owner_id, occurrence.event_type)
            .await?
        else {
            return Ok(DispatchOutcome::NoAction);
        };

        if !action.is_enabled {
            return Ok(DispatchOutcome::Disabled);
        }

        let payload = compose(&action, &occurrence.context);
        if payload.is_empty() {
            return Ok(DispatchOutcome::Empty);
        }

        let channel = self
            .channels
            .resolve(&occurrence.owner_id, Some(&action.browser_source_channel))
            .await?;

        let receivers = self
            .broadcaster
            .broadcast(&channel.name, ServerMessage::Alert { payload })
            .await;
        self.metrics.broadcast_published(receivers);

        info!(
            "Alert for {} delivered to '{}' ({receivers} receivers)",
            occurrence.event_type, channel.name
        );

        Ok(DispatchOutcome::Delivered {
            channel: channel.name,
            receivers,
        })
    }

    /// Broadcast a synthetic text alert to everyone on `channel`
    pub async fn test_alert(&self, channel: &str) -> usize {
        let payload = compose_test_alert(channel);
        let receivers = self
            .broadcaster
            .broadcast(channel, ServerMessage::Alert { payload })
            .await;

        self.metrics.alert_dispatched("test");
        info!("Test alert sent to '{channel}' ({receivers} receivers)");
        receivers
    }

    pub fn actions(&self) -> &EventActionRepository {
        &self.actions
    }

    pub fn channels(&self) -> &BrowserSourceChannelRepository {
        &self.channels
    }
}
