//! Startup Resolution Task
//!
//! Resolves the initially active file without delaying the server start.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::resolver::Resolver;

/// Spawns the resolution of the file active at startup.
///
/// Switch requests arriving before it finishes are refused as busy, the
/// same as during any other resolution.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_startup_resolution(resolver: Arc<Resolver>, active_file: PathBuf) -> JoinHandle<()> {
    tokio::spawn(async move {
        debug!("Running startup resolution for {}", active_file.display());

        match resolver.resolve(Some(&active_file)).await {
            Ok(Some(target)) => info!("Startup friend file: {}", target.display()),
            Ok(None) => info!("No friend file for {}", active_file.display()),
            Err(e) => warn!("Startup resolution failed: {}", e),
        }
    })
}
