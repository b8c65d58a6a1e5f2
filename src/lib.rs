//! File Switcher - friend-file resolver for editors
//!
//! Finds the counterpart of the file being edited (a header for a source
//! file and back) anywhere in the workspace, closest directory first, and
//! remembers the answer in a bounded path cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod resolver;
pub mod tasks;
pub mod workspace;

pub use api::AppState;
pub use config::{Config, Settings};
pub use resolver::Resolver;
pub use tasks::spawn_startup_resolution;
