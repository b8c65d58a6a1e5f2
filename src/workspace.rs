//! Workspace Module
//!
//! The set of workspace folders the host considers project boundaries.

use std::path::{Path, PathBuf};

// == Workspace ==
/// Ordered workspace folders; the first one is the main folder.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    folders: Vec<PathBuf>,
}

impl Workspace {
    pub fn new(folders: Vec<PathBuf>) -> Self {
        Self { folders }
    }

    /// The folder settings are read for.
    pub fn main_folder(&self) -> Option<&Path> {
        self.folders.first().map(PathBuf::as_path)
    }

    /// The folder owning `path`. With nested folders the deepest one wins.
    pub fn folder_for(&self, path: &Path) -> Option<&Path> {
        self.folders
            .iter()
            .filter(|folder| path.starts_with(folder))
            .max_by_key(|folder| folder.components().count())
            .map(PathBuf::as_path)
    }

    pub fn folders(&self) -> &[PathBuf] {
        &self.folders
    }
}
