//! DNS Counter - appliance entry point

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use dns_counter::{
    api::create_router,
    config::Config,
    display::ConsoleDisplay,
    input::GpioLine,
    services::ResetCue,
    state::AppState,
    storage::StateStore,
    tasks::{input_watcher_task, render_loop_task, WatcherTiming},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "dns_counter={},tower_http=info",
            config.log_level()
        ))
        .init();

    info!("Starting dns-counter v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: persistence={}, button pin={}, refresh={}s, api={}",
        config.persistence_file.display(),
        config.button_pin,
        config.refresh_secs,
        !config.no_api
    );

    // The display is the one resource the appliance cannot run without.
    let display = match ConsoleDisplay::new() {
        Ok(display) => display,
        Err(e) => {
            tracing::error!("Failed to acquire display: {:#}", e);
            std::process::exit(1);
        }
    };

    let store = StateStore::new(config.persistence_file.clone());
    let seed = store.load();
    info!("Counter initialized with start time: {}", seed);

    let cue = if config.no_audio {
        None
    } else {
        Some(ResetCue::new(
            config.audio_file.clone(),
            config.audio_device.clone(),
        ))
    };
    let state = Arc::new(AppState::new(seed, store, cue));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Start the display refresh background task
    let render_handle = tokio::spawn(render_loop_task(
        Arc::clone(&state),
        display,
        config.refresh_interval(),
        shutdown_rx.clone(),
    ));

    // Start the button watcher; a missing or unreadable line is a
    // recoverable degradation, not a startup failure.
    let watcher_handle = match GpioLine::open(config.button_value_path()) {
        Ok(line) => {
            let timing = WatcherTiming {
                sample_interval: config.sample_interval(),
                debounce_window: config.debounce_window(),
            };
            Some(tokio::spawn(input_watcher_task(
                Arc::clone(&state),
                line,
                timing,
                shutdown_rx.clone(),
            )))
        }
        Err(e) => {
            warn!("Button unavailable ({:#}), continuing in display-only mode", e);
            None
        }
    };

    if config.no_api {
        info!("HTTP API disabled");
        shutdown_signal().await;
        info!("Shutdown signal received");
    } else {
        let app = create_router(Arc::clone(&state));
        let addr = config.address();
        let listener = TcpListener::bind(&addr).await?;

        info!("API server running on http://{}", addr);
        info!("Endpoints:");
        info!("  GET  /api/state - Current timer state");
        info!("  POST /api/reset - Reset the counter");
        info!("  GET  /health    - Health check");

        let server = axum::serve(listener, app);

        tokio::select! {
            result = server => {
                if let Err(e) = result {
                    tracing::error!("Server error: {}", e);
                }
            }
            _ = shutdown_signal() => {
                info!("Shutdown signal received");
            }
        }
    }

    // Stop the loops and wait for them, so an in-flight persistence write
    // completes and the display is blanked before the process exits.
    let _ = shutdown_tx.send(true);
    if let Some(handle) = watcher_handle {
        let _ = tokio::time::timeout(Duration::from_secs(2), handle).await;
    }
    let _ = tokio::time::timeout(Duration::from_secs(2), render_handle).await;

    info!("Shutdown complete");
    Ok(())
}
