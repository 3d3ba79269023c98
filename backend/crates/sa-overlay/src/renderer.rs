use crate::render_surface::{
    ImageElement, MountedAlert, RenderSurface, SoundElement, TextElement, VideoElement,
};
use crate::{MediaResolver, MediaSource};

use sa_core::AlertPayload;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use log::{debug, warn};

pub const DEFAULT_FADE_OUT_MS: u64 = 500;

type Branch<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Renders one alert on a surface from mount to unmount
pub struct Renderer<S: RenderSurface> {
    surface: Arc<S>,
    resolver: MediaResolver,
    fade_out: Duration,
}

impl<S: RenderSurface> Renderer<S> {
    pub fn new(surface: Arc<S>, resolver: MediaResolver) -> Self {
        Self {
            surface,
            resolver,
            fade_out: Duration::from_millis(DEFAULT_FADE_OUT_MS),
        }
    }

    pub fn with_fade_out(mut self, fade_out: Duration) -> Self {
        self.fade_out = fade_out;
        self
    }

    /// Show `payload` and resolve once it has been removed again.
    ///
    /// The alert stays up until video, sound and the text/image timer have
    /// all finished. A media element that fails counts as finished.
    pub async fn render(&self, payload: &AlertPayload) {
        let mounted = self.layout(payload);
        self.surface.mount(&mounted).await;

        let image_load = mounted.image.clone().map(|image| {
            let surface = Arc::clone(&self.surface);
            tokio::spawn(async move {
                if let Err(e) = surface.load_image(&image).await {
                    warn!("Image {} failed to load: {e}", image.source);
                }
            })
        });

        let mut branches: Vec<Branch<'_>> = Vec::with_capacity(3);

        if let Some(video) = &mounted.video {
            branches.push(Box::pin(async move {
                if let Err(e) = self.surface.play_video(video).await {
                    debug!("Video {} ended early: {e}", video.source);
                }
            }));
        }

        if let Some(sound) = &mounted.sound {
            branches.push(Box::pin(async move {
                if let Err(e) = self.surface.play_sound(sound).await {
                    debug!("Sound {} ended early: {e}", sound.source);
                }
            }));
        }

        if let Some(ms) = payload.fixed_duration_ms() {
            branches.push(Box::pin(tokio::time::sleep(Duration::from_millis(ms))));
        }

        join_all(branches).await;

        self.surface.fade_out(self.fade_out).await;
        self.surface.unmount().await;

        if let Some(handle) = image_load {
            handle.abort();
        }
    }

    /// Container contents for `payload`; media whose path cannot be resolved is left out
    pub fn layout(&self, payload: &AlertPayload) -> MountedAlert {
        MountedAlert {
            position: payload.layout_position(),
            text: payload.text.as_ref().map(|t| TextElement {
                content: t.content.clone(),
                position: t.position,
                style: t.style.clone(),
            }),
            image: payload.image.as_ref().and_then(|i| {
                self.source(&i.file_path).map(|source| ImageElement {
                    source,
                    position: i.position,
                    width: i.width,
                    height: i.height,
                })
            }),
            video: payload.video.as_ref().and_then(|v| {
                self.source(&v.file_path).map(|source| VideoElement {
                    source,
                    position: v.position,
                    width: v.width,
                    height: v.height,
                    volume: v.volume,
                })
            }),
            sound: payload.sound.as_ref().and_then(|s| {
                self.source(&s.file_path).map(|source| SoundElement {
                    source,
                    volume: s.volume,
                })
            }),
        }
    }

    fn source(&self, file_path: &str) -> Option<MediaSource> {
        self.resolver
            .resolve(file_path)
            .map_err(|e| warn!("Skipping media '{file_path}': {e}"))
            .ok()
    }
}
