//! File Finder Module
//!
//! The filesystem query provider behind the progressive search.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, SwitcherError};
use crate::resolver::pattern::WorkspaceGlob;

// == File Finder ==
/// Finds files under a workspace root by glob.
///
/// Patterns are relative to `root` and support `**` and `{a,b}`. Paths
/// matching `exclude` are skipped, and excluded directories are not
/// descended into.
#[async_trait]
pub trait FileFinder: Send + Sync {
    async fn find_files(
        &self,
        root: &Path,
        include: &str,
        exclude: Option<&str>,
        max_results: usize,
    ) -> Result<Vec<PathBuf>>;
}

// == Walk Finder ==
/// `FileFinder` that walks the directory tree on a blocking thread.
///
/// The walk starts at the deepest directory the include pattern names
/// literally, so sibling trees of the searched scope are never visited.
/// Entries are visited in file-name order so results are deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkFinder;

impl WalkFinder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileFinder for WalkFinder {
    async fn find_files(
        &self,
        root: &Path,
        include: &str,
        exclude: Option<&str>,
        max_results: usize,
    ) -> Result<Vec<PathBuf>> {
        let include = WorkspaceGlob::new(include)?;
        let exclude = exclude.map(WorkspaceGlob::new).transpose()?;

        let metadata = tokio::fs::metadata(root).await?;
        if !metadata.is_dir() {
            return Err(SwitcherError::Search(format!(
                "workspace root is not a directory: {}",
                root.display()
            )));
        }

        let root = root.to_path_buf();
        let start = root.join(literal_prefix(include.as_str()));
        let walk = tokio::task::spawn_blocking(move || {
            walk_matches(&root, &start, &include, exclude.as_ref(), max_results)
        })
        .await
        .map_err(|e| SwitcherError::Internal(format!("file search task failed: {e}")))?;

        debug!("Walked {} entries, {} matched", walk.visited, walk.found.len());
        Ok(walk.found)
    }
}

/// Result of one directory walk.
struct Walk {
    found: Vec<PathBuf>,
    /// Entries yielded by the walker, including pruned directories
    visited: usize,
}

/// Walks `start`, a directory inside `root`, matching root-relative paths.
fn walk_matches(
    root: &Path,
    start: &Path,
    include: &WorkspaceGlob,
    exclude: Option<&WorkspaceGlob>,
    max_results: usize,
) -> Walk {
    let mut walk = Walk {
        found: Vec::new(),
        visited: 0,
    };
    if max_results == 0 || !start.is_dir() {
        return walk;
    }

    let walker = WalkDir::new(start)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match (exclude, relative_path(root, entry.path())) {
            (Some(exclude), Some(relative)) => !exclude.matches(&relative),
            _ => true,
        });

    for entry in walker {
        walk.visited += 1;
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(relative) = relative_path(root, entry.path()) else {
            continue;
        };

        if include.matches(&relative) {
            walk.found.push(entry.into_path());
            if walk.found.len() >= max_results {
                break;
            }
        }
    }

    walk
}

/// Leading directories of `pattern` that contain no wildcard, unescaped.
///
/// Only files below this directory can match, so the walk starts there.
/// The last segment is always treated as the file name.
fn literal_prefix(pattern: &str) -> PathBuf {
    let mut segments: Vec<&str> = pattern.split('/').collect();
    segments.pop();

    segments
        .into_iter()
        .map_while(unescape_segment)
        .take_while(|segment| segment != "." && segment != "..")
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// The literal text of a segment, or None when it holds a wildcard.
///
/// Single-character classes such as `[*]` are escapes and unescape to
/// their character.
fn unescape_segment(segment: &str) -> Option<String> {
    let mut literal = String::with_capacity(segment.len());
    let mut chars = segment.chars();

    while let Some(c) = chars.next() {
        match c {
            '[' => {
                let escaped = chars.next()?;
                if chars.next()? != ']' {
                    return None;
                }
                literal.push(escaped);
            }
            '*' | '?' | ']' | '{' | '}' => return None,
            _ => literal.push(c),
        }
    }

    Some(literal)
}

/// `/`-joined path of `path` relative to `root`; empty for the root itself.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
