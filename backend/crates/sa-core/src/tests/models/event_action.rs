use crate::{CoreError, EventAction, EventType};

use googletest::prelude::*;

fn text_action() -> EventAction {
    let mut action = EventAction::new("owner-1", EventType::Follow);
    action.text.enabled = true;
    action.text.template = "{username} just followed!".to_string();
    action
}

#[test]
fn given_new_action_when_created_then_enabled_on_default_channel_without_media() {
    let action = EventAction::new("owner-1", EventType::Raid);

    assert_that!(action.is_enabled, eq(true));
    assert_that!(action.browser_source_channel.as_str(), eq("default"));
    assert_that!(action.has_enabled_media(), eq(false));
    assert_that!(action.validate(), ok(anything()));
}

#[test]
fn given_enabled_text_with_blank_template_when_validated_then_error_on_template() {
    let mut action = text_action();
    action.text.template = "   ".to_string();

    let err = action.validate().unwrap_err();

    assert_that!(err.field(), some(eq("text.template")));
}

#[test]
fn given_disabled_text_with_blank_template_when_validated_then_ok() {
    let mut action = text_action();
    action.text.enabled = false;
    action.text.template = String::new();

    assert_that!(action.validate(), ok(anything()));
}

#[test]
fn given_enabled_sound_without_path_when_validated_then_error() {
    let mut action = EventAction::new("owner-1", EventType::Cheer);
    action.sound.enabled = true;

    let err = action.validate().unwrap_err();

    assert_that!(err.field(), some(eq("sound.file_path")));
}

#[test]
fn given_video_volume_out_of_range_when_validated_then_error() {
    let mut action = EventAction::new("owner-1", EventType::Subscribe);
    action.video.enabled = true;
    action.video.file_path = Some("media/sub.webm".to_string());
    action.video.volume = 1.5;

    let err = action.validate().unwrap_err();

    assert_that!(err.field(), some(eq("video.volume")));
}

#[test]
fn given_zero_image_duration_when_validated_then_error() {
    let mut action = EventAction::new("owner-1", EventType::Donation);
    action.image.enabled = true;
    action.image.file_path = Some("media/coin.gif".to_string());
    action.image.duration_ms = 0;

    assert_that!(action.validate(), err(anything()));
}

#[test]
fn given_malformed_channel_name_when_validated_then_invalid_channel_name() {
    let mut action = text_action();
    action.browser_source_channel = "Alerts Main".to_string();

    let result = action.validate();

    assert!(matches!(
        result,
        Err(CoreError::InvalidChannelName { .. })
    ));
}
