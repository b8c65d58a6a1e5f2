//! File Switcher - friend-file resolver for editors
//!
//! Runs the resolver as a local HTTP service the editor host reports its
//! events to.

use std::net::SocketAddr;

use anyhow::{bail, Context};
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use file_switcher::api::{create_router, AppState};
use file_switcher::config::{Config, Settings, SettingsChange};
use file_switcher::{logging, spawn_startup_resolution};

/// Main entry point for the file switcher service.
///
/// # Startup Sequence
/// 1. Load configuration from environment variables
/// 2. Read settings and initialize logging at the configured verbosity
/// 3. Create the resolver for the workspace folders
/// 4. Resolve the initially active file in the background
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    let change = config.settings_file.as_deref().map(SettingsChange::read);
    let mut settings = Settings::default();
    if let Some(Ok(change)) = &change {
        settings.apply(change);
    }

    let log = logging::init(settings.verbosity).context("failed to initialize logging")?;

    info!("Starting File Switcher");
    match &change {
        Some(Ok(change)) => change.log_rejected(),
        Some(Err(e)) => error!("{}", e),
        None => {}
    }

    info!(
        "Configuration loaded: port={}, cache.pathCount={}",
        config.server_port, settings.cache_capacity
    );

    let state = AppState::from_config(&config, settings).with_log_handle(log);
    let Some(main_folder) = state.resolver.workspace().main_folder() else {
        bail!("no workspace folder configured, set FILE_SWITCHER_WORKSPACE");
    };
    info!(
        "Main workspace folder: {} ({} folders)",
        main_folder.display(),
        state.resolver.workspace().folders().len()
    );

    let startup_handle = config
        .active_file
        .clone()
        .map(|file| spawn_startup_resolution(state.resolver.clone(), file));

    let app = create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(startup_handle))
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// Aborts a startup resolution that is still running.
async fn shutdown_signal(startup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = startup_handle {
        if !handle.is_finished() {
            handle.abort();
            warn!("Startup resolution aborted");
        }
    }
}
