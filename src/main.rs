//! marquee - LED sign refresh daemon
//!
//! Keeps a scrolling LED sign's playlist and clock up to date over UDP.

mod config;
mod refresh;

use config::Config;
use marquee_client::{SignController, UdpTransport};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::MissedTickBehavior;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration (from file if MARQUEE_CONFIG is set, then env overrides)
    let config = match Config::load() {
        Ok(c) => {
            if let Ok(path) = std::env::var("MARQUEE_CONFIG") {
                tracing::info!("Loaded config from {}", path);
            }
            c
        }
        Err(e) => {
            tracing::error!("Failed to load config: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("{}", e);
        return Err(e.into());
    }

    tracing::info!("Starting marquee");
    tracing::info!("  Sign: {}:{}", config.sign.host, config.sign.port);
    tracing::info!(
        "  Address: group {} unit {}, drive {}",
        config.sign.group_addr,
        config.sign.unit_addr,
        config.sign.drive
    );
    tracing::info!("  Frames: {}", config.frames.0.len());
    tracing::info!("  Refresh interval: {}s", config.refresh.interval_secs);

    let transport = UdpTransport::connect(&config.sign.udp_config())?;
    let session = config.sign.session()?;
    let sign = Arc::new(Mutex::new(SignController::new(transport, session)));
    let frames = Arc::new(config.frames.0.clone());

    if config.refresh.redo_settings_on_start {
        let sign = sign.clone();
        match tokio::task::spawn_blocking(move || sign.lock().redo_settings()).await? {
            Ok(()) => tracing::info!("Restored sign settings"),
            Err(e) => tracing::warn!("Failed to restore sign settings: {}", e),
        }
    }

    let mut ticker = tokio::time::interval(config.refresh.interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let sign = sign.clone();
                let cycle_frames = frames.clone();
                let result = tokio::task::spawn_blocking(move || {
                    let mut sign = sign.lock();
                    refresh::run_cycle(&mut *sign, &cycle_frames)
                })
                .await?;

                match result {
                    Ok(()) => tracing::info!("Sign refreshed ({} frame(s))", frames.len()),
                    Err(e) => tracing::warn!("Refresh failed, retrying next cycle: {}", e),
                }
            }
            _ = &mut shutdown => {
                tracing::info!("Received shutdown signal, stopping...");
                break;
            }
        }
    }

    tracing::info!("Stopped");
    Ok(())
}
