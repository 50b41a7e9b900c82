use clap::Parser;
use futures::stream::{self, Stream, StreamExt};
use linkscan::config::{CliConfig, Config};
use linkscan::core::constants::exit_codes;
use linkscan::discovery::{DirTree, MatchStream, Rewriter, scan};
use linkscan::reporting::logging::{self, Logger, Verbosity};
use linkscan::ui::{Cli, MatchPrinter, OutputFormat, cli_to_config};

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run_linkscan_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(exit_codes::FAILURE);
        }
    }
}

/// How a scan ended from the CLI's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEnd {
    /// Every matched file was scanned
    Completed,
    /// Ctrl-C once: the walk stopped, files already being scanned finished
    Interrupted,
    /// Ctrl-C twice: gave up without waiting for files being scanned
    Aborted,
}

/// Main scan logic extracted from main() for testing
pub async fn run_linkscan_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);

    // Log from the flags alone until the config file has been merged in
    logging::init_logger(Verbosity::from_count(cli_config.verbosity), cli_config.quiet);

    // Load and merge configuration; this also rejects malformed patterns
    let config = load_and_merge_config(&cli_config)?;
    config.validate()?;

    logging::set_verbosity(config.verbosity(), cli_config.quiet);
    let logger = Logger::new(config.verbosity());

    let rewriter = config.rewriter()?;
    let format = OutputFormat::from_name(config.output_format()).unwrap_or(OutputFormat::Text);

    let root = config.root_path();
    if !root.is_dir() {
        return Err(format!("'{}' is not a directory", root.display()).into());
    }
    if config.patterns().is_empty() {
        logging::log_warning("No patterns given, nothing will be scanned");
    }
    logging::log_scan_start(&root, config.patterns());

    let tree = Arc::new(
        DirTree::new(root).respect_ignore_files(config.respect_ignore_files.unwrap_or(false)),
    );
    let started = Instant::now();
    let matches = scan(tree, config.patterns().to_vec(), config.scan_options(logger));

    let mut printer = MatchPrinter::new(io::stdout(), format);
    let end = print_matches(matches, &rewriter, &mut printer, ctrl_c_presses()).await?;
    if end == ScanEnd::Completed {
        logging::log_scan_complete(printer.printed(), started.elapsed().as_millis());
    }
    printer.finish()?;

    Ok(match end {
        ScanEnd::Completed => exit_codes::SUCCESS,
        ScanEnd::Interrupted | ScanEnd::Aborted => exit_codes::INTERRUPTED,
    })
}

/// Every Ctrl-C delivered to the process, until the handler fails.
fn ctrl_c_presses() -> impl Stream<Item = ()> {
    stream::unfold((), |()| async {
        tokio::signal::ctrl_c().await.ok().map(|()| ((), ()))
    })
}

/// Drain the scan into the printer until it closes.
///
/// The first interrupt cancels the scan; matches from files already being
/// scanned are still printed. A second interrupt returns right away without
/// waiting for them.
pub async fn print_matches<W: Write, I: Stream<Item = ()>>(
    mut matches: MatchStream,
    rewriter: &Rewriter,
    printer: &mut MatchPrinter<W>,
    interrupts: I,
) -> Result<ScanEnd, Box<dyn std::error::Error>> {
    tokio::pin!(interrupts);
    let mut watching_interrupts = true;
    let mut interrupted = false;

    loop {
        tokio::select! {
            pressed = interrupts.next(), if watching_interrupts => match pressed {
                Some(()) if interrupted => {
                    logging::log_warning("Interrupted again, exiting without waiting for files being scanned");
                    return Ok(ScanEnd::Aborted);
                }
                Some(()) => {
                    logging::log_warning("Interrupted, finishing files already being scanned (Ctrl-C again to exit now)");
                    interrupted = true;
                    matches.cancel();
                }
                None => watching_interrupts = false,
            },
            next = matches.recv() => match next {
                Some(found) => printer.print(&rewriter.apply(found))?,
                None => break,
            }
        }
    }

    matches.finish().await?;
    Ok(if interrupted {
        ScanEnd::Interrupted
    } else {
        ScanEnd::Completed
    })
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    Ok(config)
}
