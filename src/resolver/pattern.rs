//! Workspace Glob Patterns
//!
//! `glob::Pattern` with `{a,b}` alternation on top. Patterns are matched
//! against workspace-relative paths joined with `/`.

use glob::{MatchOptions, Pattern};

use crate::error::{Result, SwitcherError};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

// == Workspace Glob ==
/// A compiled glob, expanded into one `Pattern` per brace alternative.
#[derive(Debug, Clone)]
pub struct WorkspaceGlob {
    source: String,
    alternatives: Vec<Pattern>,
}

impl WorkspaceGlob {
    /// Compiles `pattern`, expanding every brace group.
    pub fn new(pattern: &str) -> Result<Self> {
        let alternatives = expand_braces(pattern)
            .iter()
            .map(|alternative| Pattern::new(alternative))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                SwitcherError::Search(format!("invalid glob pattern '{pattern}': {e}"))
            })?;

        Ok(Self {
            source: pattern.to_string(),
            alternatives,
        })
    }

    /// Returns true if any alternative matches the relative path.
    pub fn matches(&self, relative_path: &str) -> bool {
        self.alternatives
            .iter()
            .any(|pattern| pattern.matches_with(relative_path, MATCH_OPTIONS))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

/// Escapes a literal path piece so it can be embedded in a pattern.
///
/// Braces are escaped too since `glob` itself does not know them.
pub fn escape_literal(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for c in Pattern::escape(literal).chars() {
        match c {
            '{' | '}' => {
                escaped.push('[');
                escaped.push(c);
                escaped.push(']');
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Expands brace groups: `a.{h,hpp}` becomes `a.h` and `a.hpp`.
///
/// Groups may nest. Braces inside `[...]` classes and unbalanced braces are
/// left as they are.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let chars: Vec<char> = pattern.chars().collect();

    let Some(group) = first_brace_group(&chars) else {
        return vec![pattern.to_string()];
    };

    let prefix: String = chars[..group.open].iter().collect();
    let suffix: String = chars[group.close + 1..].iter().collect();

    let mut bounds = Vec::with_capacity(group.commas.len() + 2);
    bounds.push(group.open);
    bounds.extend(group.commas);
    bounds.push(group.close);

    bounds
        .windows(2)
        .flat_map(|window| {
            let alternative: String = chars[window[0] + 1..window[1]].iter().collect();
            expand_braces(&format!("{prefix}{alternative}{suffix}"))
        })
        .collect()
}

struct BraceGroup {
    open: usize,
    close: usize,
    /// Top-level commas of the group
    commas: Vec<usize>,
}

fn first_brace_group(chars: &[char]) -> Option<BraceGroup> {
    let mut open = None;
    let mut depth = 0usize;
    let mut commas = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '[' => {
                if let Some(end) = class_end(chars, i) {
                    i = end;
                }
            }
            '{' => {
                if open.is_none() {
                    open = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    return open.map(|open| BraceGroup {
                        open,
                        close: i,
                        commas,
                    });
                }
            }
            ',' if depth == 1 => commas.push(i),
            _ => {}
        }
        i += 1;
    }

    None
}

/// Index of the `]` closing the class opened at `start`.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start + 1;
    if chars.get(i) == Some(&'!') {
        i += 1;
    }
    // A leading `]` is a literal member of the class.
    if chars.get(i) == Some(&']') {
        i += 1;
    }
    (i..chars.len()).find(|&j| chars[j] == ']')
}
