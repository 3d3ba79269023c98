use crate::AlertPayload;

use serde::{Deserialize, Serialize};

/// Messages pushed from the server to a browser source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Sent once, right after the connection is accepted
    Connected {
        #[serde(rename = "clientId")]
        client_id: String,
    },
    Alert {
        payload: AlertPayload,
    },
    Pong,
}

impl ServerMessage {
    /// Message type for metrics/logging
    pub fn message_type(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::Alert { .. } => "alert",
            Self::Pong => "pong",
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
