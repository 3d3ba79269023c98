use crate::EventType;

use std::str::FromStr;

#[test]
fn test_event_type_round_trips_through_str() {
    for event_type in EventType::ALL {
        assert_eq!(EventType::from_str(event_type.as_str()).unwrap(), event_type);
    }
}

#[test]
fn test_event_type_from_str_rejects_unknown() {
    assert!(EventType::from_str("channel.follow").is_err());
    assert!(EventType::from_str("Follow").is_err());
    assert!(EventType::from_str("").is_err());
}

#[test]
fn test_event_type_serializes_snake_case() {
    let json = serde_json::to_string(&EventType::GiftSubscription).unwrap();
    assert_eq!(json, "\"gift_subscription\"");
}
