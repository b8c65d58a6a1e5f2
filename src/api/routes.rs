//! API Routes
//!
//! Configures the Axum router with all file switcher endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    active_editor_handler, health_handler, settings_handler, stats_handler, switch_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /editor/active` - Active editor changed, resolve its friend file
/// - `POST /switch` - Get the friend file to open
/// - `PUT /settings` - Apply a settings change
/// - `GET /stats` - Get path cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin, the host may run in a webview
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/editor/active", post(active_editor_handler))
        .route("/switch", post(switch_handler))
        .route("/settings", put(settings_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
