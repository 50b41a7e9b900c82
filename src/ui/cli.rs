// Command-line interface definitions and parsing for linkscan

use crate::config::CliConfig;
use crate::core::constants::output_formats;
use crate::discovery::rewrite::RewriteRule;
use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find URLs in files matching glob patterns",
    long_about = None
)]
pub struct Cli {
    /// Glob patterns selecting files to scan, relative to the root (e.g. '**/*.md')
    pub patterns: Vec<String>,

    // Scanning
    /// Directory to scan (default: current directory)
    #[arg(short = 'C', long, value_name = "DIR", help_heading = "Scanning")]
    pub root: Option<String>,

    /// Optional REGEX=REPLACEMENT rewrite applied to found URLs (repeatable)
    #[arg(
        short = 'r',
        long,
        value_name = "REGEX=REPLACEMENT",
        value_parser = parse_rewrite_rule,
        help_heading = "Scanning"
    )]
    pub replace: Vec<RewriteRule>,

    /// Skip files excluded by .gitignore and .ignore files
    #[arg(long, help_heading = "Scanning")]
    pub respect_ignore: bool,

    /// Matches buffered between scanners and output (default: 64)
    #[arg(long, value_name = "COUNT", help_heading = "Scanning")]
    pub buffer: Option<usize>,

    // Output & Verbosity
    /// Log verbose output; repeat to increase verbosity
    #[arg(short = 'v', long, action = ArgAction::Count, help_heading = "Output & Verbosity")]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

fn parse_rewrite_rule(value: &str) -> Result<RewriteRule, String> {
    RewriteRule::parse(value).map_err(|e| e.to_string())
}

/// Convert parsed CLI arguments into a CliConfig
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        patterns: cli.patterns.clone(),
        replace: cli.replace.clone(),
        verbosity: cli.verbose,
        quiet: cli.quiet,
        output_format: cli.format.clone(),
        root: cli.root.clone(),
        respect_ignore_files: cli.respect_ignore,
        channel_capacity: cli.buffer,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
