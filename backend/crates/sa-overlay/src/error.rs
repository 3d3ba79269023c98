use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Failed to connect to {url}: {source} {location}")]
    Connect {
        url: String,
        #[source]
        source: tungstenite::Error,
        location: ErrorLocation,
    },

    #[error("Transport error: {source} {location}")]
    Transport {
        #[source]
        source: tungstenite::Error,
        location: ErrorLocation,
    },

    #[error("Invalid URL '{value}': {source} {location}")]
    Url {
        value: String,
        #[source]
        source: url::ParseError,
        location: ErrorLocation,
    },

    #[error("Unsupported media scheme '{scheme}' {location}")]
    UnsupportedScheme {
        scheme: String,
        location: ErrorLocation,
    },

    #[error("Render loop has stopped {location}")]
    RenderLoopStopped { location: ErrorLocation },

    #[error("JSON serialization failed: {source} {location}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl OverlayError {
    #[track_caller]
    pub fn url(value: impl Into<String>, source: url::ParseError) -> Self {
        Self::Url {
            value: value.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unsupported_scheme(scheme: impl Into<String>) -> Self {
        Self::UnsupportedScheme {
            scheme: scheme.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl OverlayError {
    #[track_caller]
    pub fn render_loop_stopped() -> Self {
        Self::RenderLoopStopped {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<tungstenite::Error> for OverlayError {
    #[track_caller]
    fn from(source: tungstenite::Error) -> Self {
        Self::Transport {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for OverlayError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, OverlayError>;
