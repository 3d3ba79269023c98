#![allow(dead_code)]

use sa_core::{BrowserSourceChannel, EventAction, EventType, Position};

pub const TEST_OWNER: &str = "owner-1";

/// An enabled action with a text block, routed to the default channel
pub fn create_text_action(event_type: EventType) -> EventAction {
    let mut action = EventAction::new(TEST_OWNER, event_type);
    action.text.enabled = true;
    action.text.template = "{username} just followed!".to_string();
    action.text.duration_ms = 4000;
    action.text.position = Position::BottomCenter;
    action
}

/// An enabled action with text, sound and image blocks routed to `channel`
pub fn create_media_action(event_type: EventType, channel: &str) -> EventAction {
    let mut action = create_text_action(event_type);
    action.browser_source_channel = channel.to_string();
    action.sound.enabled = true;
    action.sound.file_path = Some("sounds/ding.mp3".to_string());
    action.sound.volume = 0.5;
    action.image.enabled = true;
    action.image.file_path = Some("images/cheer.gif".to_string());
    action.image.width = Some(320);
    action
}

pub fn create_test_channel(name: &str) -> BrowserSourceChannel {
    let mut channel = BrowserSourceChannel::new(TEST_OWNER, name);
    channel.display_name = format!("Channel {name}");
    channel.color = Some("#ff8800".to_string());
    channel
}
