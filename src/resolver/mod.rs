//! Resolver Module
//!
//! Friend-file resolution: extension pairing, search scope, the progressive
//! directory-shrinking search and the session that ties them to the cache.

mod extensions;
mod finder;
mod pattern;
mod scope;
mod search;
mod session;

#[cfg(test)]
mod testing;

pub use extensions::{friend_extensions, friend_file_name, ExtensionPairs};
pub use finder::{FileFinder, WalkFinder};
pub use pattern::{escape_literal, expand_braces, WorkspaceGlob};
pub use scope::{path_segments, scope_for, search_scope};
pub use search::{find_friend_file, SearchPlan, SearchStep};
pub use session::{CacheReport, Resolver};
