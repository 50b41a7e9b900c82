//! # linkscan
//!
//! Find URL-shaped strings in the files of a directory tree.
//!
//! Files are selected with glob patterns and scanned concurrently; every URL
//! found is streamed to the caller as soon as it is seen.
//!
//! ```no_run
//! use std::sync::Arc;
//! use linkscan::discovery::{DirTree, ScanOptions, scan};
//!
//! # async fn run() -> linkscan::Result<()> {
//! let tree = Arc::new(DirTree::new("."));
//! let mut matches = scan(tree, vec!["**/*.md".to_string()], ScanOptions::default());
//! while let Some(found) = matches.recv().await {
//!     println!("{found}");
//! }
//! matches.finish().await
//! # }
//! ```

pub mod config;
pub mod core;
pub mod discovery;
pub mod reporting;
pub mod ui;

pub use crate::core::{LinkScanError, Match, Result};
pub use crate::discovery::{CancellationToken, MatchStream, ScanOptions, scan};
