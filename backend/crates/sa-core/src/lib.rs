pub mod alert;
pub mod error;
pub mod messages;
pub mod models;
pub mod session_state;

pub use alert::alert_payload::{AlertPayload, ImageAlert, SoundAlert, TextAlert, VideoAlert};
pub use alert::composer::{compose, compose_test_alert, render_template};
pub use error::{CoreError, ErrorLocation, Result};
pub use messages::client_message::ClientMessage;
pub use messages::server_message::ServerMessage;
pub use models::action_stats::ActionStats;
pub use models::browser_source_channel::{
    BrowserSourceChannel, DEFAULT_CHANNEL_NAME, RESERVED_CHANNEL_NAMES, validate_channel_name,
};
pub use models::event_action::{
    EventAction, ImageSettings, SoundSettings, TextSettings, VideoSettings,
};
pub use models::event_occurrence::EventOccurrence;
pub use models::event_type::EventType;
pub use models::position::Position;
pub use session_state::SessionState;

/// Fallback display time for text and image blocks whose duration is unset
pub const DEFAULT_DISPLAY_DURATION_MS: u64 = 5000;

#[cfg(test)]
mod tests;
