// Rendering of matches for the terminal or for machines

use std::io::{self, Write};

use crate::core::constants::output_formats;
use crate::core::types::Match;

/// How each match is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `path: url`
    Text,
    /// `{"url":"...","path":"..."}`, one object per line
    Json,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            output_formats::TEXT => Some(OutputFormat::Text),
            output_formats::JSON => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Render a single match as one line, without the trailing newline.
pub fn format_match(found: &Match, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => found.to_string(),
        // Match only holds strings, serialization cannot fail
        OutputFormat::Json => serde_json::to_string(found).unwrap_or_default(),
    }
}

/// Writes matches line by line and counts them.
pub struct MatchPrinter<W: Write> {
    writer: W,
    format: OutputFormat,
    printed: usize,
}

impl<W: Write> MatchPrinter<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self {
            writer,
            format,
            printed: 0,
        }
    }

    pub fn print(&mut self, found: &Match) -> io::Result<()> {
        writeln!(self.writer, "{}", format_match(found, self.format))?;
        self.printed += 1;
        Ok(())
    }

    pub fn printed(&self) -> usize {
        self.printed
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}
