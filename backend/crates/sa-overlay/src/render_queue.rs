use sa_core::AlertPayload;

use std::collections::VecDeque;

/// Whether an alert is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueState {
    #[default]
    Idle,
    Rendering,
}

/// Controller deciding which alert renders next.
///
/// At most one alert renders at a time and alerts render in arrival order.
/// The queue has no depth limit; nothing is dropped, merged or pre-empted.
#[derive(Debug, Default)]
pub struct RenderQueue {
    state: QueueState,
    pending: VecDeque<AlertPayload>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept an incoming alert.
    ///
    /// Returns the alert back when it should start rendering right away,
    /// `None` when it was queued behind the current one.
    pub fn on_alert(&mut self, payload: AlertPayload) -> Option<AlertPayload> {
        match self.state {
            QueueState::Idle => {
                self.state = QueueState::Rendering;
                Some(payload)
            }
            QueueState::Rendering => {
                self.pending.push_back(payload);
                None
            }
        }
    }

    /// The current alert finished; returns the next one to render, if any
    pub fn on_render_complete(&mut self) -> Option<AlertPayload> {
        if self.state == QueueState::Idle {
            return None;
        }

        let next = self.pending.pop_front();
        if next.is_none() {
            self.state = QueueState::Idle;
        }
        next
    }

    pub fn state(&self) -> QueueState {
        self.state
    }

    /// Number of alerts waiting behind the current one
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}
