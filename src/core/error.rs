use std::fmt;

/// Error types for linkscan operations
#[derive(Debug)]
pub enum LinkScanError {
    /// IO error while traversing the tree
    Io(std::io::Error),

    /// Malformed glob pattern reached while matching
    Pattern(globset::Error),

    /// Glob pattern rejected before scanning
    InvalidPattern(String),

    /// File walking/ignore error
    FileWalking(ignore::Error),

    /// Regex compilation error (URL rewrite rules)
    Regex(regex::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Configuration error
    Config(String),

    /// Invalid argument error
    InvalidArgument(String),

    /// The walk task panicked or was torn down
    Join(String),
}

impl fmt::Display for LinkScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkScanError::Io(err) => write!(f, "IO error: {err}"),
            LinkScanError::Pattern(err) => write!(f, "Pattern error: {err}"),
            LinkScanError::InvalidPattern(pattern) => write!(f, "Invalid pattern: {pattern}"),
            LinkScanError::FileWalking(err) => write!(f, "File walking error: {err}"),
            LinkScanError::Regex(err) => write!(f, "Regex error: {err}"),
            LinkScanError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            LinkScanError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LinkScanError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            LinkScanError::Join(msg) => write!(f, "Scan task error: {msg}"),
        }
    }
}

impl std::error::Error for LinkScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinkScanError::Io(err) => Some(err),
            LinkScanError::Pattern(err) => Some(err),
            LinkScanError::FileWalking(err) => Some(err),
            LinkScanError::Regex(err) => Some(err),
            LinkScanError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LinkScanError {
    fn from(err: std::io::Error) -> Self {
        LinkScanError::Io(err)
    }
}

impl From<globset::Error> for LinkScanError {
    fn from(err: globset::Error) -> Self {
        LinkScanError::Pattern(err)
    }
}

impl From<ignore::Error> for LinkScanError {
    fn from(err: ignore::Error) -> Self {
        LinkScanError::FileWalking(err)
    }
}

impl From<regex::Error> for LinkScanError {
    fn from(err: regex::Error) -> Self {
        LinkScanError::Regex(err)
    }
}

impl From<toml::de::Error> for LinkScanError {
    fn from(err: toml::de::Error) -> Self {
        LinkScanError::TomlParsing(err)
    }
}

impl From<tokio::task::JoinError> for LinkScanError {
    fn from(err: tokio::task::JoinError) -> Self {
        LinkScanError::Join(err.to_string())
    }
}

/// Type alias for Results using LinkScanError
pub type Result<T> = std::result::Result<T, LinkScanError>;
