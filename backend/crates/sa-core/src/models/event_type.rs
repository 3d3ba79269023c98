use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Platform event that can trigger an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Follow,
    Subscribe,
    Resubscribe,
    GiftSubscription,
    Cheer,
    /// Channel point reward redemption
    Redemption,
    Raid,
    HypeTrain,
    Donation,
}

impl EventType {
    pub const ALL: [EventType; 9] = [
        Self::Follow,
        Self::Subscribe,
        Self::Resubscribe,
        Self::GiftSubscription,
        Self::Cheer,
        Self::Redemption,
        Self::Raid,
        Self::HypeTrain,
        Self::Donation,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Follow => "follow",
            Self::Subscribe => "subscribe",
            Self::Resubscribe => "resubscribe",
            Self::GiftSubscription => "gift_subscription",
            Self::Cheer => "cheer",
            Self::Redemption => "redemption",
            Self::Raid => "raid",
            Self::HypeTrain => "hype_train",
            Self::Donation => "donation",
        }
    }
}

impl FromStr for EventType {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        Self::ALL
            .into_iter()
            .find(|event_type| event_type.as_str() == s)
            .ok_or_else(|| CoreError::InvalidEventType {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
