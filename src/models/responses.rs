//! Response DTOs for the file switcher API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::path::Path;

use serde::Serialize;

use crate::config::Settings;
use crate::resolver::CacheReport;

fn display(path: Option<&Path>) -> Option<String> {
    path.map(|p| p.to_string_lossy().into_owned())
}

/// Response body for POST /editor/active
#[derive(Debug, Clone, Serialize)]
pub struct ResolveResponse {
    /// The active file the host reported
    pub source: Option<String>,
    /// Its friend file, null when none was found
    pub target: Option<String>,
}

impl ResolveResponse {
    pub fn new(source: Option<&Path>, target: Option<&Path>) -> Self {
        Self {
            source: display(source),
            target: display(target),
        }
    }
}

/// Response body for POST /switch
#[derive(Debug, Clone, Serialize)]
pub struct SwitchResponse {
    /// File the host should open
    pub target: String,
}

impl SwitchResponse {
    pub fn new(target: &Path) -> Self {
        Self {
            target: target.to_string_lossy().into_owned(),
        }
    }
}

/// Response body for PUT /settings
#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    /// Setting keys that took effect
    pub applied: Vec<String>,
    /// Why each rejected setting was ignored
    pub rejected: Vec<String>,
    /// Settings in force after the change
    pub current: Settings,
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Cached source paths
    pub entries: usize,
    /// Cache capacity, 0 when caching is disabled
    pub capacity: usize,
    /// Byte size of all cached paths
    pub estimated_bytes: usize,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Entries dropped to make room for new ones
    pub evictions: u64,
    /// Entries dropped by lowering `cache.pathCount`
    pub shrink_evictions: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheReport> for StatsResponse {
    fn from(report: CacheReport) -> Self {
        Self {
            entries: report.entries,
            capacity: report.capacity,
            estimated_bytes: report.estimated_bytes,
            hits: report.stats.hits,
            misses: report.stats.misses,
            evictions: report.stats.evictions,
            shrink_evictions: report.stats.shrink_evictions,
            hit_rate: report.stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
