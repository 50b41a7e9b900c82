//! URL discovery in file trees
//!
//! This module handles walking a file tree, matching paths against glob
//! patterns, and streaming the URLs found in matching files.

pub mod extract;
pub mod patterns;
pub mod rewrite;
pub mod scanner;
pub mod tree;

// Re-export commonly used items
pub use patterns::{PatternSet, path_matches, validate_pattern, validate_patterns};
pub use rewrite::{RewriteRule, Rewriter};
pub use scanner::{CancellationToken, MatchStream, ScanOptions, scan};
pub use tree::{DirTree, EntryKind, FileTree, MemoryTree, TreeEntry};
