/// Application-wide constants to avoid magic values throughout the codebase.
///
/// Output format constants
pub mod output_formats {
    /// Text output format - one `path: url` line per match
    pub const TEXT: &str = "text";
    /// JSON output format - one JSON object per line for automation
    pub const JSON: &str = "json";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 2] = [TEXT, JSON];
}

/// Scan pipeline tuning
pub mod scanning {
    /// Default number of matches buffered between scan tasks and the consumer
    pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;
    /// Upper bound accepted for the match buffer
    pub const MAX_CHANNEL_CAPACITY: usize = 65_536;
    /// Byte sequence every URL candidate must contain
    pub const URL_PREFILTER: &[u8] = b"http";
}

/// Configuration file discovery
pub mod config_files {
    /// Name of the config file looked up in the working directory
    pub const FILE_NAME: &str = ".linkscan.toml";
    /// How many parent directories are searched for the config file
    pub const MAX_PARENT_LEVELS: usize = 3;
}

/// Process exit codes
pub mod exit_codes {
    /// Scan completed
    pub const SUCCESS: i32 = 0;
    /// Bad arguments, bad config, or terminal walk error
    pub const FAILURE: i32 = 1;
    /// Interrupted by Ctrl-C
    pub const INTERRUPTED: i32 = 130;
}
