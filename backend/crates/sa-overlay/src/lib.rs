pub mod client;
pub mod error;
pub mod headless_surface;
pub mod interval_timer;
pub mod media_resolver;
pub mod reconnect;
pub mod render_loop;
pub mod render_queue;
pub mod render_surface;
pub mod renderer;

pub use client::{ClientConfig, DEFAULT_PING_INTERVAL, OverlayClient};
pub use error::{OverlayError, Result};
pub use headless_surface::HeadlessSurface;
pub use interval_timer::IntervalTimer;
pub use media_resolver::{MediaResolver, MediaSource};
pub use reconnect::{INITIAL_RECONNECT_DELAY, MAX_RECONNECT_DELAY, ReconnectPolicy};
pub use render_loop::{
    QueueSnapshot, RenderEvent, RenderEventLog, RenderLoop, RenderPhase, RenderQueueHandle,
};
pub use render_queue::{QueueState, RenderQueue};
pub use render_surface::{
    ImageElement, MediaError, MountedAlert, RenderSurface, SoundElement, TextElement,
    VideoElement,
};
pub use renderer::{DEFAULT_FADE_OUT_MS, Renderer};

#[cfg(test)]
mod tests;
