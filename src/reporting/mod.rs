//! Logging and reporting
//!
//! This module handles leveled logging for the scan pipeline and the CLI.

pub mod logging;

// Re-export commonly used items
pub use logging::{Logger, Verbosity};
