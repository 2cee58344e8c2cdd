//! Badge weather
//!
//! Shows current conditions for one location from wttr.in.
//!
//! # Usage
//!
//! ```sh
//! badge-weather
//! badge-weather --location "New York" --log-file weather.log
//! RUST_LOG=debug badge-weather --transport curl --log-file weather.log
//! ```

use std::io;
use std::sync::Arc;

use badge_weather::{
    init_logging, spawn_event_poller, stop_event_poller, Args, CurlFetcher, HttpFetcher,
    TerminalSurface, Transport,
};
use badge_weather_core::{FetchController, TextFetcher, ViewConfig};
use clap::Parser;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let config = args.view_config();
    info!(location = %config.location, transport = ?args.transport, "starting");

    match args.transport {
        Transport::Http => {
            let fetcher = HttpFetcher::new().map_err(io::Error::other)?;
            run(config, fetcher).await
        }
        Transport::Curl => run(config, CurlFetcher::new()).await,
    }
}

async fn run<F: TextFetcher>(config: ViewConfig, fetcher: F) -> io::Result<()> {
    let surface = TerminalSurface::acquire()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let cancel_token = CancellationToken::new();
    let poller = spawn_event_poller(event_tx, cancel_token.clone());

    let mut controller = FetchController::new(config, Arc::new(fetcher));
    controller.activate(
        surface,
        Some(Box::new(|| info!("weather view dismissed"))),
    );
    controller.run(&mut event_rx).await;

    stop_event_poller(poller, &cancel_token).await;
    Ok(())
}
