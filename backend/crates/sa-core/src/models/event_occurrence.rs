use crate::EventType;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single platform event as delivered by the event source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventOccurrence {
    pub owner_id: String,
    pub event_type: EventType,
    /// Template substitution values (username, amount, months, ...)
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl EventOccurrence {
    pub fn new(owner_id: impl Into<String>, event_type: EventType) -> Self {
        Self {
            owner_id: owner_id.into(),
            event_type,
            context: HashMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }
}
