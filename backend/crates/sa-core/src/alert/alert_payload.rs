use crate::{DEFAULT_DISPLAY_DURATION_MS, Position};

use serde::{Deserialize, Serialize};

/// Everything a browser source needs to render one alert.
///
/// Composed per event occurrence and never stored. Blocks that are absent
/// are not rendered at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextAlert>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageAlert>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoAlert>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<SoundAlert>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAlert {
    pub content: String,
    /// Display time in milliseconds
    pub duration: u64,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAlert {
    pub file_path: String,
    /// Display time in milliseconds
    pub duration: u64,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// Video plays to its natural end, so it carries no duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoAlert {
    pub file_path: String,
    pub position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub volume: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundAlert {
    pub file_path: String,
    pub volume: f32,
}

impl AlertPayload {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.image.is_none() && self.video.is_none() && self.sound.is_none()
    }

    /// Placement of the overlay container: video, then image, then text, then top-center.
    ///
    /// Only the container moves; each element keeps its own configured position
    /// inside it.
    pub fn layout_position(&self) -> Position {
        self.video
            .as_ref()
            .map(|v| v.position)
            .or_else(|| self.image.as_ref().map(|i| i.position))
            .or_else(|| self.text.as_ref().map(|t| t.position))
            .unwrap_or_default()
    }

    /// Length of the fixed display timer, `None` when neither text nor image is present.
    ///
    /// A zero duration counts as unset and falls back to the default display time.
    pub fn fixed_duration_ms(&self) -> Option<u64> {
        let text = self.text.as_ref().map(|t| effective_duration(t.duration));
        let image = self.image.as_ref().map(|i| effective_duration(i.duration));

        match (text, image) {
            (Some(t), Some(i)) => Some(t.max(i)),
            (t, i) => t.or(i),
        }
    }

    /// Names of the present blocks, for logging
    pub fn kinds(&self) -> Vec<&'static str> {
        let mut kinds = Vec::with_capacity(4);
        if self.text.is_some() {
            kinds.push("text");
        }
        if self.image.is_some() {
            kinds.push("image");
        }
        if self.video.is_some() {
            kinds.push("video");
        }
        if self.sound.is_some() {
            kinds.push("sound");
        }
        kinds
    }
}

fn effective_duration(duration: u64) -> u64 {
    if duration == 0 {
        DEFAULT_DISPLAY_DURATION_MS
    } else {
        duration
    }
}
