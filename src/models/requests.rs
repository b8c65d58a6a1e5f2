//! Request DTOs for the file switcher API
//!
//! Defines the structure of incoming HTTP request bodies. Settings updates
//! are taken as raw JSON and validated in [`crate::config`].

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Paths of the host's own output panels; they never take part in switching.
pub const OUTPUT_CHANNEL_PREFIX: &str = "extension-output-";

/// Request body for POST /editor/active
///
/// Sent whenever the host's active editor changes. A missing, null or empty
/// `path` means no file is active.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActiveEditorRequest {
    #[serde(default)]
    pub path: Option<String>,
}

impl ActiveEditorRequest {
    /// The active file, if any.
    pub fn file(&self) -> Option<PathBuf> {
        self.path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }

    /// True for editors that show host output instead of a file.
    pub fn is_output_channel(&self) -> bool {
        self.path
            .as_deref()
            .is_some_and(|path| path.starts_with(OUTPUT_CHANNEL_PREFIX))
    }

    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match self.file() {
            Some(file) if !Path::new(&file).is_absolute() => {
                Some(format!("Path must be absolute: {}", file.display()))
            }
            _ => None,
        }
    }
}
