use log::{debug, error, info, warn};
use std::fmt;

/// How chatty the scan is on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Only warnings and errors
    #[default]
    Quiet,
    /// Report each file as it is scanned
    Verbose,
    /// Also report unreadable files and pipeline lifecycle
    Debug,
}

impl Verbosity {
    /// Map a repeated `-v` count to a verbosity level.
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Quiet,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }

    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Warn,
            Verbosity::Verbose => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
        }
    }
}

/// Leveled logging handle passed into the scan pipeline.
///
/// Messages are forwarded to the `log` facade only when the handle's own
/// verbosity allows them, so a caller can scan quietly even when the global
/// logger is configured to be chatty.
#[derive(Debug, Clone, Copy, Default)]
pub struct Logger {
    verbosity: Verbosity,
}

impl Logger {
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// A handle that forwards nothing.
    pub fn quiet() -> Self {
        Self::new(Verbosity::Quiet)
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn enabled(&self, verbosity: Verbosity) -> bool {
        self.verbosity >= verbosity
    }

    pub fn verbose(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Verbosity::Verbose) {
            info!("{args}");
        }
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Verbosity::Debug) {
            debug!("{args}");
        }
    }
}

/// Initialize the process logger for the given verbosity.
///
/// `quiet` turns logging off entirely. The level can be changed later with
/// [`set_verbosity`], e.g. once a config file has been merged in.
pub fn init_logger(verbosity: Verbosity, quiet: bool) {
    // try_init so tests and embedders that already installed a logger keep theirs
    let _ = env_logger::Builder::from_default_env()
        .filter_level(Verbosity::Debug.level_filter())
        .format_module_path(false)
        .format_target(false)
        .try_init();

    set_verbosity(verbosity, quiet);
    debug!("Logger initialized with level: {:?}", log::max_level());
}

/// Change the level of the already-installed process logger.
pub fn set_verbosity(verbosity: Verbosity, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else {
        verbosity.level_filter()
    };
    log::set_max_level(level);
}

/// Log the patterns a scan is about to use
pub fn log_scan_start(root: &std::path::Path, patterns: &[String]) {
    info!("Scanning {} for {} pattern(s)", root.display(), patterns.len());
    for (i, pattern) in patterns.iter().enumerate() {
        debug!("  {}. {}", i + 1, pattern);
    }
}

/// Log scan completion
pub fn log_scan_complete(match_count: usize, duration_ms: u128) {
    info!("Scan complete: {match_count} URL(s) found ({duration_ms}ms)");
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_verbosity_from_count() {
        assert_eq!(Verbosity::from_count(0), Verbosity::Quiet);
        assert_eq!(Verbosity::from_count(1), Verbosity::Verbose);
        assert_eq!(Verbosity::from_count(2), Verbosity::Debug);
        assert_eq!(Verbosity::from_count(9), Verbosity::Debug);
    }

    #[test]
    fn test_verbosity_ordering() {
        assert!(Verbosity::Quiet < Verbosity::Verbose);
        assert!(Verbosity::Verbose < Verbosity::Debug);
    }

    #[test]
    fn test_level_filter_mapping() {
        assert_eq!(Verbosity::Quiet.level_filter(), log::LevelFilter::Warn);
        assert_eq!(Verbosity::Verbose.level_filter(), log::LevelFilter::Info);
        assert_eq!(Verbosity::Debug.level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_logger_gating() {
        let quiet = Logger::quiet();
        assert!(!quiet.enabled(Verbosity::Verbose));
        assert!(!quiet.enabled(Verbosity::Debug));

        let verbose = Logger::new(Verbosity::Verbose);
        assert!(verbose.enabled(Verbosity::Verbose));
        assert!(!verbose.enabled(Verbosity::Debug));

        let debug = Logger::new(Verbosity::Debug);
        assert!(debug.enabled(Verbosity::Verbose));
        assert!(debug.enabled(Verbosity::Debug));
    }

    #[test]
    fn test_logger_methods_do_not_panic() {
        let logger = Logger::new(Verbosity::Debug);
        logger.verbose(format_args!("scanning {}", "a.txt"));
        logger.debug(format_args!("read {}: {}", "a.txt", "denied"));
    }

    #[test]
    fn test_logger_initialization() {
        // Logger can only be installed once per process; the rest are no-ops
        init_logger(Verbosity::Debug, false);
        assert_eq!(log::max_level(), log::LevelFilter::Debug);
        init_logger(Verbosity::Quiet, true);
        assert_eq!(log::max_level(), log::LevelFilter::Off);

        set_verbosity(Verbosity::Verbose, false);
        assert_eq!(log::max_level(), log::LevelFilter::Info);
        set_verbosity(Verbosity::Quiet, false);
        assert_eq!(log::max_level(), log::LevelFilter::Warn);
    }

    #[test]
    fn test_log_helpers() {
        log_scan_start(std::path::Path::new("."), &["*.md".to_string()]);
        log_scan_complete(3, 12);
        log_warning("careful");

        let io_error = io::Error::new(io::ErrorKind::NotFound, "gone");
        log_error("Could not read", Some(&io_error));
        log_error("Plain message", None);
    }
}
