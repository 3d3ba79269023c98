use crate::MediaSource;

use sa_core::Position;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Everything placed inside the overlay container for one alert
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MountedAlert {
    /// Where the container sits on the overlay
    pub position: Position,
    pub text: Option<TextElement>,
    pub image: Option<ImageElement>,
    pub video: Option<VideoElement>,
    pub sound: Option<SoundElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub position: Position,
    pub style: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub source: MediaSource,
    pub position: Position,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoElement {
    pub source: MediaSource,
    pub position: Position,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub volume: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SoundElement {
    pub source: MediaSource,
    pub volume: f32,
}

/// Why a media element stopped without playing to its end
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("media playback is not supported by this surface")]
    Unsupported,

    #[error("failed to load {source_url}: {reason}")]
    Load { source_url: String, reason: String },

    #[error("playback of {source_url} failed: {reason}")]
    Playback { source_url: String, reason: String },
}

/// Something that can show an alert: a browser page, a window, a log.
///
/// Only one alert is mounted at a time. `play_video` and `play_sound`
/// resolve when playback reaches its natural end.
#[async_trait]
pub trait RenderSurface: Send + Sync + 'static {
    async fn mount(&self, alert: &MountedAlert);

    async fn load_image(&self, image: &ImageElement) -> Result<(), MediaError>;

    async fn play_video(&self, video: &VideoElement) -> Result<(), MediaError>;

    async fn play_sound(&self, sound: &SoundElement) -> Result<(), MediaError>;

    async fn fade_out(&self, duration: Duration);

    async fn unmount(&self);
}
