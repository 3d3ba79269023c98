use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "sa-overlay")]
#[command(about = "Browser source that renders stream alerts from a channel")]
#[command(version)]
pub struct Cli {
    /// WebSocket endpoint of the alert server
    #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
    pub(crate) server: String,

    /// Browser source channel to subscribe to (server default when omitted)
    #[arg(long)]
    pub(crate) channel: Option<String>,

    /// Base URL relative media paths are resolved against
    #[arg(long, default_value = "http://127.0.0.1:8080/media/")]
    pub(crate) media_base: String,

    /// Fade-out time before an alert is removed
    #[arg(long, default_value_t = sa_overlay::DEFAULT_FADE_OUT_MS)]
    pub(crate) fade_out_ms: u64,

    /// Seconds between keep-alive pings
    #[arg(long, default_value_t = 30)]
    pub(crate) ping_interval_secs: u64,

    /// Request a test alert after connecting
    #[arg(long)]
    pub(crate) test_alert: bool,

    #[arg(long, default_value = "info")]
    pub(crate) log_level: LevelFilter,

    /// Append logs to this file instead of stdout
    #[arg(long)]
    pub(crate) log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub(crate) no_color: bool,
}
