use serde::Serialize;
use std::fmt;

/// A URL-shaped substring found in a scanned file.
///
/// `path` is relative to the root of the scanned tree and always uses `/`
/// as separator. Many matches may share a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Match {
    /// The URL that was found
    pub url: String,
    /// Path of the file the URL was found in
    pub path: String,
}

impl Match {
    pub fn new(url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
        }
    }

    /// Returns a copy of this match with a different URL and the same path.
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            path: self.path.clone(),
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.url)
    }
}
