//! API Handlers
//!
//! HTTP request handlers, one per host event.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{Config, SettingKey, Settings, SettingsChange};
use crate::error::{Result, SwitcherError};
use crate::logging::LogHandle;
use crate::models::{
    ActiveEditorRequest, HealthResponse, ResolveResponse, SettingsResponse, StatsResponse,
    SwitchResponse,
};
use crate::resolver::{Resolver, WalkFinder};
use crate::workspace::Workspace;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The resolution session
    pub resolver: Arc<Resolver>,
    /// Set when a global subscriber was installed
    pub log: Option<LogHandle>,
}

impl AppState {
    /// Creates a new AppState around the given resolver.
    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
            log: None,
        }
    }

    /// Creates a new AppState from configuration, searching the real
    /// filesystem.
    pub fn from_config(config: &Config, settings: Settings) -> Self {
        let workspace = Workspace::new(config.workspace_folders.clone());
        Self::new(Resolver::new(Arc::new(WalkFinder::new()), workspace, settings))
    }

    pub fn with_log_handle(mut self, log: LogHandle) -> Self {
        self.log = Some(log);
        self
    }
}

/// Handler for POST /editor/active
///
/// Resolves the friend file of the newly active editor. A failing
/// filesystem query is reported as "not found".
pub async fn active_editor_handler(
    State(state): State<AppState>,
    Json(req): Json<ActiveEditorRequest>,
) -> Result<Json<ResolveResponse>> {
    if req.is_output_channel() {
        debug!("Ignoring output channel editor");
        let target = state.resolver.current_target().await;
        return Ok(Json(ResolveResponse::new(None, target.as_deref())));
    }

    if let Some(error_msg) = req.validate() {
        return Err(SwitcherError::InvalidRequest(error_msg));
    }

    let file = req.file();
    let target = match state.resolver.resolve(file.as_deref()).await {
        Ok(target) => target,
        Err(e) => {
            warn!("Friend file search failed: {}", e);
            None
        }
    };

    Ok(Json(ResolveResponse::new(file.as_deref(), target.as_deref())))
}

/// Handler for POST /switch
///
/// Returns the file the host should open, or refuses while a resolution is
/// in flight.
pub async fn switch_handler(State(state): State<AppState>) -> Result<Json<SwitchResponse>> {
    let target = state.resolver.switch_target().await?;
    Ok(Json(SwitchResponse::new(&target)))
}

/// Handler for PUT /settings
///
/// Applies a change of the `file-switcher` settings namespace. Bad values
/// are reported and leave the previous value in place.
pub async fn settings_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Json<SettingsResponse> {
    let change = SettingsChange::parse(&body);
    change.log_rejected();

    let applied = state.resolver.apply_settings(&change).await;

    if applied.contains(&SettingKey::LogLevel) {
        if let (Some(log), Some(verbosity)) = (&state.log, change.verbosity) {
            match log.set_verbosity(verbosity) {
                Ok(()) => info!("Log level set to: {}", verbosity),
                Err(e) => warn!("Could not change log level: {}", e),
            }
        }
    }

    Json(SettingsResponse {
        applied: applied.iter().map(|key| key.as_str().to_string()).collect(),
        rejected: change.rejected.iter().map(ToString::to_string).collect(),
        current: state.resolver.settings().await,
    })
}

/// Handler for GET /stats
///
/// Returns path cache occupancy and counters.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.resolver.cache_report().await))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
