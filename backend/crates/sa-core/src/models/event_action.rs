use crate::{
    CoreError, DEFAULT_CHANNEL_NAME, EventType, Position, Result as CoreErrorResult,
    validate_channel_name,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_TEXT_TEMPLATE: &str = "{username}";
const DEFAULT_DURATION_MS: u32 = 5000;
const DEFAULT_VOLUME: f32 = 0.8;

/// Rule mapping one event type of one owner to a set of media behaviours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventAction {
    pub id: Uuid,
    pub owner_id: String,
    pub event_type: EventType,

    pub is_enabled: bool,
    /// Name of the browser source channel alerts are routed to
    pub browser_source_channel: String,

    pub text: TextSettings,
    pub sound: SoundSettings,
    pub image: ImageSettings,
    pub video: VideoSettings,

    // Audit
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSettings {
    pub enabled: bool,
    /// Template with `{placeholder}` keys resolved from the event context
    pub template: String,
    pub duration_ms: u32,
    pub position: Position,
    /// CSS declarations applied to the text element
    pub style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundSettings {
    pub enabled: bool,
    pub file_path: Option<String>,
    pub volume: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSettings {
    pub enabled: bool,
    pub file_path: Option<String>,
    pub duration_ms: u32,
    pub position: Position,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSettings {
    pub enabled: bool,
    pub file_path: Option<String>,
    pub volume: f32,
    pub position: Position,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            template: DEFAULT_TEXT_TEMPLATE.to_string(),
            duration_ms: DEFAULT_DURATION_MS,
            position: Position::default(),
            style: None,
        }
    }
}

impl Default for SoundSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            file_path: None,
            volume: DEFAULT_VOLUME,
        }
    }
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            file_path: None,
            duration_ms: DEFAULT_DURATION_MS,
            position: Position::default(),
            width: None,
            height: None,
        }
    }
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            file_path: None,
            volume: DEFAULT_VOLUME,
            position: Position::default(),
            width: None,
            height: None,
        }
    }
}

impl EventAction {
    /// New enabled action with every media block switched off, routed to the default channel
    pub fn new(owner_id: impl Into<String>, event_type: EventType) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            event_type,
            is_enabled: true,
            browser_source_channel: DEFAULT_CHANNEL_NAME.to_string(),
            text: TextSettings::default(),
            sound: SoundSettings::default(),
            image: ImageSettings::default(),
            video: VideoSettings::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Reject configurations that cannot be rendered as configured.
    ///
    /// Only enabled blocks are checked: a disabled block may keep stale or
    /// empty values around until the user switches it back on.
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.owner_id.trim().is_empty() {
            return Err(CoreError::validation("owner_id", "owner id cannot be empty"));
        }

        validate_channel_name(&self.browser_source_channel)?;

        if self.text.enabled {
            if self.text.template.trim().is_empty() {
                return Err(CoreError::validation(
                    "text.template",
                    "text is enabled but the template is empty",
                ));
            }
            if self.text.duration_ms == 0 {
                return Err(CoreError::validation(
                    "text.duration_ms",
                    "text duration must be greater than zero",
                ));
            }
        }

        if self.sound.enabled {
            require_path("sound.file_path", &self.sound.file_path)?;
            check_volume("sound.volume", self.sound.volume)?;
        }

        if self.image.enabled {
            require_path("image.file_path", &self.image.file_path)?;
            if self.image.duration_ms == 0 {
                return Err(CoreError::validation(
                    "image.duration_ms",
                    "image duration must be greater than zero",
                ));
            }
        }

        if self.video.enabled {
            require_path("video.file_path", &self.video.file_path)?;
            check_volume("video.volume", self.video.volume)?;
        }

        Ok(())
    }

    /// True if at least one media block is switched on
    pub fn has_enabled_media(&self) -> bool {
        self.text.enabled || self.sound.enabled || self.image.enabled || self.video.enabled
    }
}

#[track_caller]
fn require_path(field: &str, path: &Option<String>) -> CoreErrorResult<()> {
    match path.as_deref().map(str::trim) {
        Some(p) if !p.is_empty() => Ok(()),
        _ => Err(CoreError::validation(
            field,
            format!("{field} is required when the block is enabled"),
        )),
    }
}

#[track_caller]
fn check_volume(field: &str, volume: f32) -> CoreErrorResult<()> {
    if (0.0..=1.0).contains(&volume) {
        Ok(())
    } else {
        Err(CoreError::validation(
            field,
            format!("volume must be between 0.0 and 1.0, got {volume}"),
        ))
    }
}
