//! Core types and foundational components
//!
//! This module contains the match record, error handling,
//! and constants used throughout the application.

pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items for convenience
pub use error::{LinkScanError, Result};
pub use types::Match;
