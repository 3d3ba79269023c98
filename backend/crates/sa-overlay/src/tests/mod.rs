mod media_resolver;
mod reconnect;

use crate::render_surface::{
    ImageElement, MediaError, MountedAlert, RenderSurface, SoundElement, VideoElement,
};
use crate::{MediaResolver, Renderer};

use sa_core::{AlertPayload, ImageAlert, Position, SoundAlert, TextAlert, VideoAlert};

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

pub(crate) const MEDIA_BASE: &str = "http://media.test/alerts/";

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SurfaceCall {
    Mount(Position),
    ImageLoaded(String),
    ImageFailed(String),
    VideoEnded(String),
    SoundEnded(String),
    FadeOut(Duration),
    Unmount,
}

/// Surface with scripted media lengths and failures, recording every call
#[derive(Default)]
pub(crate) struct ScriptedSurface {
    media_lengths: HashMap<String, Duration>,
    broken: HashSet<String>,
    calls: Mutex<Vec<(Instant, SurfaceCall)>>,
}

impl ScriptedSurface {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Video or sound `file` plays for `length`
    pub(crate) fn with_media(mut self, file: &str, length: Duration) -> Self {
        self.media_lengths.insert(media_url(file), length);
        self
    }

    /// `file` fails to load
    pub(crate) fn with_broken(mut self, file: &str) -> Self {
        self.broken.insert(media_url(file));
        self
    }

    pub(crate) fn calls(&self) -> Vec<SurfaceCall> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, call)| call.clone())
            .collect()
    }

    pub(crate) fn mounted_at(&self) -> Vec<Instant> {
        self.times(|call| matches!(call, SurfaceCall::Mount(_)))
    }

    pub(crate) fn unmounted_at(&self) -> Vec<Instant> {
        self.times(|call| matches!(call, SurfaceCall::Unmount))
    }

    fn times(&self, filter: impl Fn(&SurfaceCall) -> bool) -> Vec<Instant> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, call)| filter(call))
            .map(|(at, _)| *at)
            .collect()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push((Instant::now(), call));
    }

    async fn play(&self, url: &str) -> Result<(), MediaError> {
        if self.broken.contains(url) {
            return Err(MediaError::Load {
                source_url: url.to_string(),
                reason: "404".to_string(),
            });
        }
        let length = self.media_lengths.get(url).copied().unwrap_or_default();
        tokio::time::sleep(length).await;
        Ok(())
    }
}

#[async_trait]
impl RenderSurface for ScriptedSurface {
    async fn mount(&self, alert: &MountedAlert) {
        self.record(SurfaceCall::Mount(alert.position));
    }

    async fn load_image(&self, image: &ImageElement) -> Result<(), MediaError> {
        let url = image.source.as_str().to_string();
        if self.broken.contains(&url) {
            self.record(SurfaceCall::ImageFailed(url.clone()));
            return Err(MediaError::Load {
                source_url: url,
                reason: "404".to_string(),
            });
        }
        self.record(SurfaceCall::ImageLoaded(url));
        Ok(())
    }

    async fn play_video(&self, video: &VideoElement) -> Result<(), MediaError> {
        let result = self.play(video.source.as_str()).await;
        self.record(SurfaceCall::VideoEnded(video.source.to_string()));
        result
    }

    async fn play_sound(&self, sound: &SoundElement) -> Result<(), MediaError> {
        let result = self.play(sound.source.as_str()).await;
        self.record(SurfaceCall::SoundEnded(sound.source.to_string()));
        result
    }

    async fn fade_out(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
        self.record(SurfaceCall::FadeOut(duration));
    }

    async fn unmount(&self) {
        self.record(SurfaceCall::Unmount);
    }
}

pub(crate) fn media_url(file: &str) -> String {
    format!("{MEDIA_BASE}{file}")
}

/// Renderer over `surface` without a fade, so durations can be checked exactly
pub(crate) fn scripted_renderer(surface: Arc<ScriptedSurface>) -> Renderer<ScriptedSurface> {
    Renderer::new(surface, MediaResolver::new(MEDIA_BASE).unwrap()).with_fade_out(Duration::ZERO)
}

pub(crate) fn text(content: &str, duration: u64) -> AlertPayload {
    AlertPayload {
        text: Some(TextAlert {
            content: content.to_string(),
            duration,
            position: Position::TopCenter,
            style: None,
        }),
        ..Default::default()
    }
}

pub(crate) fn with_image(mut payload: AlertPayload, file: &str, duration: u64) -> AlertPayload {
    payload.image = Some(ImageAlert {
        file_path: file.to_string(),
        duration,
        position: Position::Center,
        width: None,
        height: None,
    });
    payload
}

pub(crate) fn with_video(mut payload: AlertPayload, file: &str) -> AlertPayload {
    payload.video = Some(VideoAlert {
        file_path: file.to_string(),
        position: Position::BottomRight,
        width: Some(640),
        height: Some(360),
        volume: 0.5,
    });
    payload
}

pub(crate) fn with_sound(mut payload: AlertPayload, file: &str) -> AlertPayload {
    payload.sound = Some(SoundAlert {
        file_path: file.to_string(),
        volume: 0.8,
    });
    payload
}
