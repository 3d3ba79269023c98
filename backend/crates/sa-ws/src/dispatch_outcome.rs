use serde::Serialize;

/// What happened to one event occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// No action is configured for the event type
    NoAction,
    /// An action exists but is switched off
    Disabled,
    /// The action composed to an alert with nothing to render
    Empty,
    /// The alert was pushed to `receivers` live connections on `channel`
    Delivered { channel: String, receivers: usize },
}

impl DispatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoAction => "no_action",
            Self::Disabled => "disabled",
            Self::Empty => "empty",
            Self::Delivered { .. } => "delivered",
        }
    }
}
