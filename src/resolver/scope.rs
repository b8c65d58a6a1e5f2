//! Search Scope Module
//!
//! Computes which directories, relative to the workspace root, bound the
//! friend-file search.

use std::path::Path;

/// Splits a path string on `/` and `\`.
///
/// Position based, not normalized: a POSIX absolute path yields a leading
/// empty segment, a drive-letter path does not.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split(['/', '\\']).collect()
}

/// Directory segments strictly inside the workspace, from the root's child
/// down to the file's own directory.
///
/// Empty when the file directory has fewer segments than the root.
pub fn search_scope<S: AsRef<str>>(workspace_root_segments: usize, file_dir_segments: &[S]) -> Vec<String> {
    if file_dir_segments.len() < workspace_root_segments {
        return Vec::new();
    }

    file_dir_segments[workspace_root_segments..]
        .iter()
        .map(|segment| segment.as_ref().to_string())
        .collect()
}

/// Search scope of `file_dir` inside `workspace_root`.
///
/// Trailing separators on the root are ignored so `/ws/` and `/ws` count the
/// same number of segments.
pub fn scope_for(workspace_root: &Path, file_dir: &Path) -> Vec<String> {
    let root = workspace_root.to_string_lossy();
    let root = root.trim_end_matches(['/', '\\']);
    let root_segments = if root.is_empty() {
        // "/" itself
        1
    } else {
        path_segments(root).len()
    };

    let dir = file_dir.to_string_lossy();
    search_scope(root_segments, &path_segments(&dir))
}
