//! Regex-based URL rewriting applied to matches after they are found.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::{LinkScanError, Result};
use crate::core::types::Match;

/// A `pattern` → `replacement` pair as written in config or on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    pub pattern: String,
    pub replacement: String,
}

impl RewriteRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// Parse `REGEX=REPLACEMENT`, splitting at the first `=`.
    pub fn parse(value: &str) -> Result<Self> {
        match value.split_once('=') {
            Some((pattern, replacement)) if !pattern.is_empty() => {
                Ok(Self::new(pattern, replacement))
            }
            _ => Err(LinkScanError::InvalidArgument(format!(
                "'{value}' is not a REGEX=REPLACEMENT pair"
            ))),
        }
    }
}

/// Ordered list of compiled rewrite rules.
///
/// Every rule is applied in turn to the output of the previous one, replacing
/// all occurrences. Replacement strings may refer to capture groups (`$1`,
/// `${name}`).
#[derive(Debug, Clone, Default)]
pub struct Rewriter {
    rules: Vec<(Regex, String)>,
}

impl Rewriter {
    pub fn new(rules: &[RewriteRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| -> Result<(Regex, String)> {
                Ok((Regex::new(&rule.pattern)?, rule.replacement.clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rewrite_url(&self, url: &str) -> String {
        self.rules
            .iter()
            .fold(url.to_string(), |current, (regex, replacement)| {
                regex.replace_all(&current, replacement.as_str()).into_owned()
            })
    }

    /// Returns the match with its URL rewritten; the path is untouched.
    pub fn apply(&self, found: Match) -> Match {
        if self.rules.is_empty() {
            return found;
        }
        found.with_url(self.rewrite_url(&found.url))
    }
}
