use crate::Position;

use std::str::FromStr;

#[test]
fn test_position_default_is_top_center() {
    assert_eq!(Position::default(), Position::TopCenter);
}

#[test]
fn test_position_from_str() {
    assert_eq!(Position::from_str("bottom-left").unwrap(), Position::BottomLeft);
    assert_eq!(Position::from_str("center").unwrap(), Position::Center);
    assert!(Position::from_str("bottom_left").is_err());
}

#[test]
fn test_position_serializes_kebab_case() {
    let json = serde_json::to_string(&Position::MiddleRight).unwrap();
    assert_eq!(json, "\"middle-right\"");
}
