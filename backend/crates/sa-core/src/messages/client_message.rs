use serde::{Deserialize, Serialize};

/// Messages a browser source sends to the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    Ping,
    /// Ask the server for a synthetic alert on this connection's channel
    TestAlert,
}

impl ClientMessage {
    pub fn message_type(&self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::TestAlert => "test-alert",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
