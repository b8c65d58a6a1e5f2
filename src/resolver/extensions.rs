//! Extension Pairing Module
//!
//! Maps a file extension onto the configured group of friend extensions.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::resolver::pattern::escape_literal;

// == Extension Pairs ==
/// Two comma-separated groups of extensions that are friends of each other,
/// e.g. `"h,hpp"` and `"c,cpp"`.
///
/// Field names follow the `extensions` setting object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionPairs {
    pub extensions1: String,
    pub extensions2: String,
}

impl ExtensionPairs {
    pub fn new(extensions1: impl Into<String>, extensions2: impl Into<String>) -> Self {
        Self {
            extensions1: extensions1.into(),
            extensions2: extensions2.into(),
        }
    }
}

impl Default for ExtensionPairs {
    fn default() -> Self {
        Self::new("h,hpp", "c,cpp")
    }
}

/// Returns the group opposite to the one containing `current_extension`.
///
/// A single leading dot is ignored. Membership is an exact match against the
/// comma-split group; the first group is checked first.
pub fn friend_extensions(current_extension: &str, pairs: &ExtensionPairs) -> Option<String> {
    let extension = current_extension
        .strip_prefix('.')
        .unwrap_or(current_extension);

    let in_group = |group: &str| group.split(',').any(|member| member == extension);

    if in_group(&pairs.extensions1) {
        Some(pairs.extensions2.clone())
    } else if in_group(&pairs.extensions2) {
        Some(pairs.extensions1.clone())
    } else {
        None
    }
}

/// Builds the friend file name glob for `file`, e.g. `main.{h,hpp}` for
/// `src/main.cpp`.
///
/// Returns None for files without an extension or without a friend group.
pub fn friend_file_name(file: &Path, pairs: &ExtensionPairs) -> Option<String> {
    let extension = file.extension()?.to_str()?;
    if extension.is_empty() {
        return None;
    }
    let stem = file.file_stem()?.to_str()?;
    let friends = friend_extensions(extension, pairs)?;

    Some(format!("{}.{{{}}}", escape_literal(stem), friends))
}
