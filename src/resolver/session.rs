//! Resolution Session Module
//!
//! Owns everything a resolution touches: the path cache, the current switch
//! target and the in-progress marker.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, PathCache};
use crate::config::{SettingKey, Settings, SettingsChange};
use crate::error::{Result, SwitcherError};
use crate::resolver::extensions::friend_file_name;
use crate::resolver::finder::FileFinder;
use crate::resolver::scope::scope_for;
use crate::resolver::search::find_friend_file;
use crate::workspace::Workspace;

/// Point-in-time view of the path cache.
#[derive(Debug, Clone, Serialize)]
pub struct CacheReport {
    pub entries: usize,
    pub capacity: usize,
    pub estimated_bytes: usize,
    pub stats: CacheStats,
}

// == Resolver ==
/// Resolves friend files and remembers the last result for switching.
///
/// Resolutions run one at a time in the order they were triggered. While any
/// resolution is queued or running, [`Resolver::is_resolving`] is true so a
/// switch request can refuse instead of using a stale target. Only the turn
/// lock is held across a filesystem query; the cache, target and settings
/// locks are released before it.
pub struct Resolver {
    finder: Arc<dyn FileFinder>,
    workspace: Workspace,
    settings: RwLock<Settings>,
    cache: Mutex<PathCache>,
    target: RwLock<Option<PathBuf>>,
    pending: AtomicUsize,
    turn: Mutex<()>,
}

impl Resolver {
    pub fn new(finder: Arc<dyn FileFinder>, workspace: Workspace, settings: Settings) -> Self {
        Self {
            finder,
            workspace,
            cache: Mutex::new(PathCache::new(settings.cache_capacity)),
            settings: RwLock::new(settings),
            target: RwLock::new(None),
            pending: AtomicUsize::new(0),
            turn: Mutex::new(()),
        }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// True while a resolution is queued or in flight.
    pub fn is_resolving(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    pub async fn current_target(&self) -> Option<PathBuf> {
        self.target.read().await.clone()
    }

    /// The file to switch to, if switching is possible right now.
    pub async fn switch_target(&self) -> Result<PathBuf> {
        if self.is_resolving() {
            warn!("Currently storing switch file. Cannot switch files yet.");
            return Err(SwitcherError::Busy);
        }

        match self.current_target().await {
            Some(target) => {
                debug!("Attempting to switch to file: {}", target.display());
                Ok(target)
            }
            None => {
                info!("No friend file was found to switch to for current file. Cannot switch files.");
                Err(SwitcherError::NoFriend)
            }
        }
    }

    pub async fn settings(&self) -> Settings {
        self.settings.read().await.clone()
    }

    /// Applies a validated settings change. Returns the keys that changed.
    pub async fn apply_settings(&self, change: &SettingsChange) -> Vec<SettingKey> {
        let applied = self.settings.write().await.apply(change);

        if let Some(capacity) = change.cache_capacity {
            self.set_cache_capacity(capacity).await;
        }
        for key in &applied {
            debug!("Changing setting: {}", key.as_str());
        }

        applied
    }

    pub async fn set_cache_capacity(&self, capacity: usize) {
        self.cache.lock().await.set_capacity(capacity);
        info!("Path cache capacity set to {}", capacity);
    }

    pub async fn cache_report(&self) -> CacheReport {
        let cache = self.cache.lock().await;
        CacheReport {
            entries: cache.len(),
            capacity: cache.capacity(),
            estimated_bytes: cache.estimated_byte_size(),
            stats: cache.stats(),
        }
    }

    // == Resolve ==
    /// Resolves and stores the friend file of `current_file`.
    ///
    /// `Ok(None)` covers every expected miss: no file, no extension pairing,
    /// a file outside the workspace, or nothing on disk. Errors only come
    /// from the filesystem query; the stored target is cleared then as well.
    pub async fn resolve(&self, current_file: Option<&Path>) -> Result<Option<PathBuf>> {
        let _pending = PendingGuard::enter(&self.pending);
        let _turn = self.turn.lock().await;

        let Some(current_file) = current_file else {
            debug!("Returning reason: no current file");
            self.reset().await;
            return Ok(None);
        };
        info!("Resolving friend file for {}", current_file.display());

        let key = current_file.to_string_lossy().into_owned();
        if let Some(cached) = self.cached(&key).await {
            info!("Current path found in path cache");
            let target = PathBuf::from(cached);
            self.set_target(Some(target.clone())).await;
            return Ok(Some(target));
        }

        let pairs = self.settings.read().await.extension_pairs.clone();
        let Some(file_name) = friend_file_name(current_file, &pairs) else {
            debug!("Returning reason: Couldn't create switch file name");
            self.reset().await;
            return Ok(None);
        };

        let Some(root) = self.workspace.folder_for(current_file) else {
            warn!("Current file isn't part of any workspace: {}", current_file.display());
            self.reset().await;
            return Ok(None);
        };

        let file_dir = current_file.parent().unwrap_or_else(|| Path::new(""));
        let scope = scope_for(root, file_dir);
        info!("Search folders are: {:?}", scope);

        let found = match find_friend_file(self.finder.as_ref(), &file_name, root, &scope).await {
            Ok(found) => found,
            Err(e) => {
                self.reset().await;
                return Err(e);
            }
        };

        let Some(found) = found else {
            debug!("Returning reason: No switch file found");
            self.reset().await;
            return Ok(None);
        };

        self.set_target(Some(found.clone())).await;
        self.remember(key, &found).await;
        info!("Switch path set to: {}", found.display());

        Ok(Some(found))
    }

    async fn cached(&self, key: &str) -> Option<String> {
        let mut cache = self.cache.lock().await;
        if cache.is_disabled() {
            return None;
        }
        cache.lookup(key)
    }

    async fn remember(&self, key: String, found: &Path) {
        let mut cache = self.cache.lock().await;
        if cache.contains_key(&key) {
            return;
        }
        cache.set(key, found.to_string_lossy().into_owned());

        info!(
            "Cache entries: {}/{}, Est. Size in Memory(KiB): {:.2}",
            cache.len(),
            cache.capacity(),
            cache.estimated_byte_size() as f64 / 1024.0
        );
    }

    async fn set_target(&self, target: Option<PathBuf>) {
        debug!("Current switch path set to: {:?}", target);
        *self.target.write().await = target;
    }

    async fn reset(&self) {
        debug!("Resetting switch target.");
        self.set_target(None).await;
    }
}

/// Counts a resolution as pending until dropped, on every exit path.
struct PendingGuard<'a>(&'a AtomicUsize);

impl<'a> PendingGuard<'a> {
    fn enter(pending: &'a AtomicUsize) -> Self {
        pending.fetch_add(1, Ordering::SeqCst);
        Self(pending)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
