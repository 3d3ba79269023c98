use crate::{BrowserSourceChannel, CoreError, validate_channel_name};

use googletest::prelude::*;

#[test]
fn given_valid_names_when_checked_then_ok() {
    let longest = "a".repeat(50);
    for name in ["ab", "alerts-main", "raid_alerts", "scene-2", longest.as_str()] {
        assert_that!(validate_channel_name(name), ok(anything()));
    }
}

#[test]
fn given_invalid_names_when_checked_then_rejected() {
    let too_long = "a".repeat(51);
    for name in ["a", "", "Alerts", "with space", "dots.here", "ümlaut", too_long.as_str()] {
        assert_that!(validate_channel_name(name), err(anything()));
    }
}

#[test]
fn given_reserved_name_when_channel_validated_then_rejected() {
    let channel = BrowserSourceChannel::new("owner-1", "admin");

    let result = channel.validate();

    assert!(matches!(result, Err(CoreError::InvalidChannelName { .. })));
}

#[test]
fn given_default_channel_when_validated_then_ok() {
    let channel = BrowserSourceChannel::new_default("owner-1");

    assert_that!(channel.is_default, eq(true));
    assert_that!(channel.name.as_str(), eq("default"));
    assert_that!(channel.validate(), ok(anything()));
}

#[test]
fn given_bad_color_when_validated_then_error_on_color() {
    let mut channel = BrowserSourceChannel::new("owner-1", "alerts-main");
    channel.color = Some("red".to_string());

    let err = channel.validate().unwrap_err();

    assert_that!(err.field(), some(eq("color")));
}

#[test]
fn given_hex_color_when_validated_then_ok() {
    let mut channel = BrowserSourceChannel::new("owner-1", "alerts-main");
    channel.color = Some("#9146FF".to_string());

    assert_that!(channel.validate(), ok(anything()));
}
