//! Progressive Search Module
//!
//! Looks for the friend file closest to the current directory first, then
//! widens one directory level at a time toward the workspace root.
//!
//! Each widened query excludes the directory searched just before it, so a
//! subtree that already came up empty is never walked twice. The queries
//! depend on each other's failure and therefore run strictly in order.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::Result;
use crate::resolver::finder::FileFinder;
use crate::resolver::pattern::escape_literal;

/// One glob query of the progressive search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchStep {
    /// `<dirs>/**/<file name>`, relative to the workspace root
    pub include: String,
    /// The directory prefix of the previous step
    pub exclude: Option<String>,
}

// == Search Plan ==
/// Yields the queries of a progressive search, narrowest scope first.
///
/// A scope of `n` segments yields `n` steps; an empty scope yields none.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    file_name: String,
    segments: Vec<String>,
    exclude: Option<String>,
}

impl SearchPlan {
    /// `file_name` is used as is and may carry a brace group; scope segments
    /// are escaped.
    pub fn new<S: AsRef<str>>(file_name: &str, scope: &[S]) -> Self {
        Self {
            file_name: file_name.to_string(),
            segments: scope.iter().map(|s| escape_literal(s.as_ref())).collect(),
            exclude: None,
        }
    }
}

impl Iterator for SearchPlan {
    type Item = SearchStep;

    fn next(&mut self) -> Option<SearchStep> {
        if self.segments.is_empty() {
            return None;
        }

        let folders = self.segments.join("/");
        let step = SearchStep {
            include: format!("{}/**/{}", folders, self.file_name),
            exclude: self.exclude.take(),
        };

        self.exclude = Some(folders);
        self.segments.pop();
        Some(step)
    }
}

/// Runs the progressive search and returns the first match, if any.
///
/// Every query asks for at most one result. Finder errors end the search
/// and are returned unchanged.
pub async fn find_friend_file<S: AsRef<str>>(
    finder: &dyn FileFinder,
    file_name: &str,
    workspace_root: &Path,
    scope: &[S],
) -> Result<Option<PathBuf>> {
    for step in SearchPlan::new(file_name, scope) {
        debug!(
            "Searching here: {} {} (exclude: {:?})",
            workspace_root.display(),
            step.include,
            step.exclude
        );

        let found = finder
            .find_files(workspace_root, &step.include, step.exclude.as_deref(), 1)
            .await?;

        if let Some(first) = found.into_iter().next() {
            info!("Found friend file: {}", first.display());
            return Ok(Some(first));
        }
    }

    Ok(None)
}
