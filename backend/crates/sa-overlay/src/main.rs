mod cli;
mod logger;

use crate::cli::Cli;

use sa_overlay::{
    ClientConfig, HeadlessSurface, MediaResolver, OverlayClient, RenderLoop, Renderer,
};

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    logger::initialize(cli.log_level, cli.log_file.clone(), !cli.no_color)?;

    let resolver = MediaResolver::new(&cli.media_base)?;
    let renderer = Renderer::new(Arc::new(HeadlessSurface::new()), resolver)
        .with_fade_out(Duration::from_millis(cli.fade_out_ms));
    let (render_loop, queue) = RenderLoop::new(renderer);
    let render_task = tokio::spawn(render_loop.run());

    let mut config = ClientConfig::new(&cli.server, cli.channel.clone())?;
    config.ping_interval = Duration::from_secs(cli.ping_interval_secs.max(1));
    config.request_test_alert = cli.test_alert;

    info!("Overlay connecting to {}", config.connect_url());

    let mut client = OverlayClient::new(config, queue);

    tokio::select! {
        _ = client.run() => {}
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    drop(client);
    render_task.abort();

    info!("Overlay stopped");
    Ok(())
}
