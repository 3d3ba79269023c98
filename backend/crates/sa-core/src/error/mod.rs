pub use error_location::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Invalid event type: {value} {location}")]
    InvalidEventType {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid position: {value} {location}")]
    InvalidPosition {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid channel name '{name}': {reason} {location}")]
    InvalidChannelName {
        name: String,
        reason: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Create a validation error for a specific field
    #[track_caller]
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }

    /// Field name if this error refers to one
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => field.as_deref(),
            Self::InvalidChannelName { .. } => Some("name"),
            Self::InvalidEventType { .. } => Some("event_type"),
            Self::InvalidPosition { .. } => Some("position"),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
