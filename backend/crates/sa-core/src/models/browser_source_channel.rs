use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the channel every owner always has
pub const DEFAULT_CHANNEL_NAME: &str = "default";

/// Names that would collide with routes or read as sentinel values
pub const RESERVED_CHANNEL_NAMES: &[&str] = &[
    "api",
    "admin",
    "ws",
    "health",
    "new",
    "edit",
    "delete",
    "settings",
    "null",
    "undefined",
];

const MIN_NAME_LENGTH: usize = 2;
const MAX_NAME_LENGTH: usize = 50;

/// Named routing target that browser sources subscribe to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserSourceChannel {
    pub id: Uuid,
    pub owner_id: String,

    pub name: String,
    pub display_name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,

    pub is_default: bool,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BrowserSourceChannel {
    pub fn new(owner_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        let name = name.into();
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            display_name: name.clone(),
            name,
            description: None,
            icon: None,
            color: None,
            is_default: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn new_default(owner_id: impl Into<String>) -> Self {
        let mut channel = Self::new(owner_id, DEFAULT_CHANNEL_NAME);
        channel.display_name = "Default".to_string();
        channel.description = Some("Receives alerts not routed anywhere else".to_string());
        channel.is_default = true;
        channel
    }

    /// Full write-time validation: name format, reserved words, metadata lengths
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        // The default channel carries a fixed name and skips the reserved-word check
        if !self.is_default {
            validate_channel_name(&self.name)?;
            if RESERVED_CHANNEL_NAMES.contains(&self.name.as_str()) {
                return Err(invalid_name(&self.name, "name is reserved"));
            }
        }

        if self.display_name.trim().is_empty() {
            return Err(CoreError::validation(
                "display_name",
                "display name cannot be empty",
            ));
        }

        if let Some(color) = &self.color
            && !is_hex_color(color)
        {
            return Err(CoreError::validation(
                "color",
                format!("color must be a #rrggbb hex value, got '{color}'"),
            ));
        }

        Ok(())
    }
}

/// Checks that a channel name matches `[a-z0-9_-]{2,50}`.
///
/// This is the format rule only; reserved words are checked when a channel is
/// written, because the transport accepts any well-formed name on connect.
#[track_caller]
pub fn validate_channel_name(name: &str) -> CoreErrorResult<()> {
    if name.len() < MIN_NAME_LENGTH || name.len() > MAX_NAME_LENGTH {
        return Err(invalid_name(
            name,
            &format!("must be {MIN_NAME_LENGTH}-{MAX_NAME_LENGTH} characters"),
        ));
    }

    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
    {
        return Err(invalid_name(
            name,
            "only lowercase letters, digits, '_' and '-' are allowed",
        ));
    }

    Ok(())
}

#[track_caller]
fn invalid_name(name: &str, reason: &str) -> CoreError {
    CoreError::InvalidChannelName {
        name: name.to_string(),
        reason: reason.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].bytes().all(|b| b.is_ascii_hexdigit())
}
