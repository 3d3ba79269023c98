use crate::{QueueState, RenderQueue, RenderSurface, Renderer};

use sa_core::AlertPayload;

use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info};
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

/// Published after every queue transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueSnapshot {
    pub state: QueueState,
    pub pending: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPhase {
    Started,
    Finished,
}

/// One step in the history of rendered alerts
#[derive(Debug, Clone)]
pub struct RenderEvent {
    pub phase: RenderPhase,
    pub payload: AlertPayload,
    pub at: Instant,
}

/// Shared, append-only record of render starts and finishes
#[derive(Debug, Clone, Default)]
pub struct RenderEventLog {
    events: Arc<Mutex<Vec<RenderEvent>>>,
}

impl RenderEventLog {
    fn record(&self, phase: RenderPhase, payload: &AlertPayload) {
        let event = RenderEvent {
            phase,
            payload: payload.clone(),
            at: Instant::now(),
        };
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    pub fn snapshot(&self) -> Vec<RenderEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of alerts that have been taken off screen
    pub fn finished_count(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.phase == RenderPhase::Finished)
            .count()
    }
}

/// Feeding side of a [`RenderLoop`]; cheap to clone and outlives any connection
#[derive(Clone)]
pub struct RenderQueueHandle {
    tx: mpsc::UnboundedSender<AlertPayload>,
    state_rx: watch::Receiver<QueueSnapshot>,
    events: RenderEventLog,
}

impl RenderQueueHandle {
    /// Hand an alert to the render loop; false once the loop has stopped
    pub fn enqueue(&self, payload: AlertPayload) -> bool {
        self.tx.send(payload).is_ok()
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        *self.state_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueueSnapshot> {
        self.state_rx.clone()
    }

    pub fn events(&self) -> &RenderEventLog {
        &self.events
    }
}

/// Drives a [`RenderQueue`], rendering one alert at a time
pub struct RenderLoop<S: RenderSurface> {
    queue: RenderQueue,
    renderer: Renderer<S>,
    rx: mpsc::UnboundedReceiver<AlertPayload>,
    state_tx: watch::Sender<QueueSnapshot>,
    events: RenderEventLog,
}

impl<S: RenderSurface> RenderLoop<S> {
    pub fn new(renderer: Renderer<S>) -> (Self, RenderQueueHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(QueueSnapshot::default());
        let events = RenderEventLog::default();

        let render_loop = Self {
            queue: RenderQueue::new(),
            renderer,
            rx,
            state_tx,
            events: events.clone(),
        };
        let handle = RenderQueueHandle {
            tx,
            state_rx,
            events,
        };
        (render_loop, handle)
    }

    /// Run until every handle is dropped and the queue has drained
    pub async fn run(mut self) {
        while let Some(payload) = self.rx.recv().await {
            let mut next = self.queue.on_alert(payload);
            while let Some(current) = next {
                self.publish();
                self.render_one(current).await;
                next = self.queue.on_render_complete();
            }
            self.publish();
        }
        info!("Render loop stopped");
    }

    /// Render `payload` while still accepting new alerts into the queue
    async fn render_one(&mut self, payload: AlertPayload) {
        let Self {
            queue,
            renderer,
            rx,
            state_tx,
            events,
        } = self;

        debug!("Rendering alert [{}]", payload.kinds().join(", "));
        events.record(RenderPhase::Started, &payload);

        let render = renderer.render(&payload);
        tokio::pin!(render);

        let mut accepting = true;
        loop {
            tokio::select! {
                _ = &mut render => break,
                incoming = rx.recv(), if accepting => match incoming {
                    Some(alert) => {
                        // Always queued: the state is Rendering here
                        let _ = queue.on_alert(alert);
                        publish(state_tx, queue);
                        debug!("Alert queued, {} pending", queue.pending());
                    }
                    None => accepting = false,
                },
            }
        }

        events.record(RenderPhase::Finished, &payload);
    }

    fn publish(&self) {
        publish(&self.state_tx, &self.queue);
    }
}

fn publish(state_tx: &watch::Sender<QueueSnapshot>, queue: &RenderQueue) {
    state_tx.send_replace(QueueSnapshot {
        state: queue.state(),
        pending: queue.pending(),
    });
}
