use crate::render_surface::{
    ImageElement, MediaError, MountedAlert, RenderSurface, SoundElement, VideoElement,
};

use std::time::Duration;

use async_trait::async_trait;
use log::info;

/// Surface that writes each render step to the log.
///
/// It cannot decode media, so video and sound report `Unsupported` at once
/// and only the text/image timer keeps an alert on screen.
#[derive(Debug, Default, Clone)]
pub struct HeadlessSurface;

impl HeadlessSurface {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RenderSurface for HeadlessSurface {
    async fn mount(&self, alert: &MountedAlert) {
        info!("Mount alert at {}", alert.position.as_str());
        if let Some(text) = &alert.text {
            info!("  text [{}]: {}", text.position.as_str(), text.content);
        }
    }

    async fn load_image(&self, image: &ImageElement) -> Result<(), MediaError> {
        info!("  image [{}]: {}", image.position.as_str(), image.source);
        Ok(())
    }

    async fn play_video(&self, video: &VideoElement) -> Result<(), MediaError> {
        info!("  video [{}]: {}", video.position.as_str(), video.source);
        Err(MediaError::Unsupported)
    }

    async fn play_sound(&self, sound: &SoundElement) -> Result<(), MediaError> {
        info!("  sound: {} (volume {:.2})", sound.source, sound.volume);
        Err(MediaError::Unsupported)
    }

    async fn fade_out(&self, duration: Duration) {
        info!("Fade out over {}ms", duration.as_millis());
        tokio::time::sleep(duration).await;
    }

    async fn unmount(&self) {
        info!("Unmount alert");
    }
}
