//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::constants::{config_files, output_formats, scanning};
use crate::core::error::{LinkScanError, Result};
use crate::discovery::patterns::validate_patterns;
use crate::discovery::rewrite::{RewriteRule, Rewriter};
use crate::discovery::scanner::ScanOptions;
use crate::reporting::logging::{self, Logger, Verbosity};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Glob patterns selecting the files to scan
    pub patterns: Option<Vec<String>>,

    /// Ordered URL rewrite rules
    pub replace: Option<Vec<RewriteRule>>,

    /// 0 = quiet, 1 = verbose, 2+ = debug
    pub verbosity: Option<u8>,

    /// Output format (text, json)
    pub output_format: Option<String>,

    /// Directory to scan
    pub root: Option<String>,

    /// Honour .gitignore and .ignore files while walking
    pub respect_ignore_files: Option<bool>,

    /// Matches buffered between scan tasks and the printer
    pub channel_capacity: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            patterns: None,
            replace: None,
            verbosity: Some(0),
            output_format: Some(output_formats::DEFAULT.to_string()),
            root: None, // Current directory
            respect_ignore_files: Some(false),
            channel_capacity: Some(scanning::DEFAULT_CHANNEL_CAPACITY),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            LinkScanError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content)?;

        config.validate()?;
        Ok(config)
    }

    /// Look for a config file in `dir` and up to three of its parents.
    pub fn load_from_standard_locations_in(dir: &Path) -> Self {
        let mut current = Some(dir);
        for _ in 0..=config_files::MAX_PARENT_LEVELS {
            let Some(candidate_dir) = current else {
                break;
            };
            let candidate = candidate_dir.join(config_files::FILE_NAME);
            if candidate.is_file() {
                match Self::load_from_file(&candidate) {
                    Ok(config) => return config,
                    Err(e) => logging::log_warning(&format!(
                        "Ignoring {}: {e}",
                        candidate.display()
                    )),
                }
            }
            current = candidate_dir.parent();
        }

        Self::default()
    }

    /// Try to find and load a config file starting from the current directory
    pub fn load_from_standard_locations() -> Self {
        match std::env::current_dir() {
            Ok(dir) => Self::load_from_standard_locations_in(&dir),
            Err(_) => Self::default(),
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if !cli_config.patterns.is_empty() {
            self.patterns = Some(cli_config.patterns.clone());
        }

        // CLI rules run after the configured ones
        if !cli_config.replace.is_empty() {
            let mut rules = self.replace.take().unwrap_or_default();
            rules.extend(cli_config.replace.iter().cloned());
            self.replace = Some(rules);
        }

        if cli_config.verbosity > 0 {
            self.verbosity = Some(cli_config.verbosity);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }

        if let Some(ref root) = cli_config.root {
            self.root = Some(root.clone());
        }
        if cli_config.respect_ignore_files {
            self.respect_ignore_files = Some(true);
        }
        if let Some(capacity) = cli_config.channel_capacity {
            self.channel_capacity = Some(capacity);
        }
    }

    pub fn patterns(&self) -> &[String] {
        self.patterns.as_deref().unwrap_or_default()
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_count(self.verbosity.unwrap_or(0))
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(self.root.as_deref().unwrap_or("."))
    }

    /// Compile the configured rewrite rules
    pub fn rewriter(&self) -> Result<Rewriter> {
        Rewriter::new(self.replace.as_deref().unwrap_or_default())
    }

    pub fn scan_options(&self, logger: Logger) -> ScanOptions {
        ScanOptions::default()
            .with_channel_capacity(
                self.channel_capacity
                    .unwrap_or(scanning::DEFAULT_CHANNEL_CAPACITY),
            )
            .with_logger(logger)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(capacity) = self.channel_capacity
            && !(1..=scanning::MAX_CHANNEL_CAPACITY).contains(&capacity)
        {
            return Err(LinkScanError::Config(format!(
                "Channel capacity {capacity} is out of range. Expected a value between 1-{}.",
                scanning::MAX_CHANNEL_CAPACITY
            )));
        }

        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(LinkScanError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        validate_patterns(self.patterns())?;

        // Validate rewrite rules by trying to compile them
        self.rewriter()?;

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub patterns: Vec<String>,          // PATTERNS...
    pub replace: Vec<RewriteRule>,      // --replace
    pub verbosity: u8,                  // -v, repeated
    pub quiet: bool,                    // --quiet
    pub output_format: Option<String>,  // --format
    pub root: Option<String>,           // --root
    pub respect_ignore_files: bool,     // --respect-ignore
    pub channel_capacity: Option<usize>, // --buffer
    pub config_file: Option<String>,    // --config
    pub no_config: bool,                // --no-config
}
