//! Glob pattern matching for tree-relative paths.
//!
//! Matching is delegated to `globset`. `*` and `?` never cross a `/`, `**`
//! spans directories, and `[...]` classes and `{a,b}` alternation are
//! supported.

use globset::{Glob, GlobBuilder, GlobMatcher};

use crate::core::error::{LinkScanError, Result};

fn build_glob(pattern: &str) -> std::result::Result<Glob, globset::Error> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .backslash_escape(true)
        .build()
}

/// Returns true if `pattern` is a syntactically valid glob.
pub fn validate_pattern(pattern: &str) -> bool {
    build_glob(pattern).is_ok()
}

/// Check every pattern, failing on the first invalid one.
pub fn validate_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<()> {
    for pattern in patterns {
        let pattern = pattern.as_ref();
        if !validate_pattern(pattern) {
            return Err(LinkScanError::InvalidPattern(pattern.to_string()));
        }
    }
    Ok(())
}

/// Match a single pattern against a tree-relative path.
pub fn path_matches(pattern: &str, path: &str) -> Result<bool> {
    let matcher = build_glob(pattern)?.compile_matcher();
    Ok(matcher.is_match(path))
}

/// Ordered set of glob patterns evaluated with logical OR.
///
/// Every pattern is compiled up front, but a compilation failure is only
/// reported when matching reaches that pattern. A set whose first pattern
/// matches a path never trips over a malformed pattern later in the list.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<(String, std::result::Result<GlobMatcher, globset::Error>)>,
}

impl PatternSet {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = patterns
            .into_iter()
            .map(|pattern| {
                let pattern = pattern.into();
                let compiled = build_glob(&pattern).map(|glob| glob.compile_matcher());
                (pattern, compiled)
            })
            .collect();

        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Evaluate patterns in order and stop at the first match.
    pub fn matches(&self, path: &str) -> Result<bool> {
        for (_, compiled) in &self.patterns {
            match compiled {
                Ok(matcher) if matcher.is_match(path) => return Ok(true),
                Ok(_) => continue,
                Err(err) => return Err(LinkScanError::Pattern(err.clone())),
            }
        }
        Ok(false)
    }
}
